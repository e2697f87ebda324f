pub mod board;
pub mod config;
pub mod laptimes_api;

pub mod models {
    pub mod best_times;
    pub mod lap;
}

pub mod helpers {
    pub mod classifier;
    pub mod filter;
    pub mod format;
    pub mod logging;
    pub mod lookup;
    pub mod sectors;
    pub mod sort;
    pub mod view;
}
