pub mod time_utils;
