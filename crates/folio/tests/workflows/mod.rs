use super::*;

mod import_and_read;
mod library;
