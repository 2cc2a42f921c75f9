pub mod win_path;
