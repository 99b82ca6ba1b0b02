pub mod board_fmt;
