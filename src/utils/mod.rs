mod time_utils;

pub use time_utils::{MS_IN_D, MS_IN_MIN, MS_IN_S, epoch_ms_to_time_string, now_timestamp_ms};
