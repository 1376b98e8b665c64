use crate::error::StoreError;
use crate::hub::WatchHub;
use crate::store::ObjectStore;

mod hub_test;
mod store_test;
