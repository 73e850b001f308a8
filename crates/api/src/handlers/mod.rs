pub mod activity;
pub mod fast_start;
pub mod history;
pub mod pages;
pub mod storyboard;
pub mod tags;
pub mod variation;
