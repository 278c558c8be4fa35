use crate::ports::{RecordStore, RecordStream};
use std::sync::Arc;

pub struct DumpRecordsUseCase {
    store: Arc<dyn RecordStore>,
}

impl DumpRecordsUseCase {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self) -> RecordStream {
        self.store.iterate()
    }
}
