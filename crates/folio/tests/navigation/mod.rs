use super::*;

mod branches;
mod chapters;
