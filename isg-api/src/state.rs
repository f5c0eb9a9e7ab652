use std::sync::Arc;

use isg_common::DeviceTable;
use isg_scrape::{Device, IsgClient};

/// Shared by every handler; holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub device: Arc<dyn Device>,
    pub table: Arc<DeviceTable>,
    pub device_url: String,
}

impl AppState {
    pub fn new(client: IsgClient, table: DeviceTable) -> Self {
        let device_url = client.base_url().to_string();
        Self {
            device: Arc::new(client),
            table: Arc::new(table),
            device_url,
        }
    }
}
