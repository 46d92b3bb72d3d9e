pub mod app;
pub mod episode_grid;
pub mod episode_selector;
pub mod video_list;
pub mod video_player;
