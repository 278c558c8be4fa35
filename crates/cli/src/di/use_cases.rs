use super::Repositories;
use hatedns_api::AppState;
use hatedns_application::use_cases::{
    DumpRecordsUseCase, GetRecordUseCase, PutRecordUseCase, ResolveQueryUseCase,
};
use hatedns_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub resolve_query: Arc<ResolveQueryUseCase>,
    pub get_record: Arc<GetRecordUseCase>,
    pub put_record: Arc<PutRecordUseCase>,
    pub dump_records: Arc<DumpRecordsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            resolve_query: Arc::new(ResolveQueryUseCase::new(repos.records.clone())),
            get_record: Arc::new(GetRecordUseCase::new(repos.records.clone())),
            put_record: Arc::new(PutRecordUseCase::new(repos.records.clone())),
            dump_records: Arc::new(DumpRecordsUseCase::new(repos.records.clone())),
        }
    }
}

pub fn app_state(use_cases: &UseCases, config: &Config) -> AppState {
    AppState {
        get_record: use_cases.get_record.clone(),
        put_record: use_cases.put_record.clone(),
        dump_records: use_cases.dump_records.clone(),
        records: Arc::new(config.records.clone()),
    }
}
