//! Translation feature set

pub mod translator;
