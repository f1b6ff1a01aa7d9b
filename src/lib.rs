pub mod cli {
    pub mod commands;
    pub mod handlers;
    pub mod output;
}
pub mod io {
    pub mod config_io;
    pub mod log;
}
pub mod model;
pub mod ops {
    pub mod draft;
    pub mod task_ops;
}
pub mod tui;
