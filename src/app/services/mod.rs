//! Business operations independent of any widget toolkit.

pub mod richtext;
