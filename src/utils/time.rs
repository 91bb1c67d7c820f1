use chrono::Local;

pub fn snapshot_timestamp_slug() -> String {
    Local::now().format("%Y_%m_%d_%H_%M_%S").to_string()
}
