mod dump_records;
mod get_record;
mod put_record;

pub use dump_records::DumpRecordsUseCase;
pub use get_record::GetRecordUseCase;
pub use put_record::PutRecordUseCase;
