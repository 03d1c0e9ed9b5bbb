use super::*;

mod listing;
mod sync;
