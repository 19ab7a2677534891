//! Integration test modules

mod navigation;
mod rendering;
mod site_loading;
