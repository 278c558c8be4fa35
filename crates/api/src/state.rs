use hatedns_application::use_cases::{DumpRecordsUseCase, GetRecordUseCase, PutRecordUseCase};
use hatedns_domain::config::RecordsConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_record: Arc<GetRecordUseCase>,
    pub put_record: Arc<PutRecordUseCase>,
    pub dump_records: Arc<DumpRecordsUseCase>,
    pub records: Arc<RecordsConfig>,
}
