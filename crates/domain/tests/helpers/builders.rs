#![allow(dead_code)]
use hatedns_domain::{DomainError, RecordClass, RecordSet, RecordType};

pub struct RecordSetBuilder {
    name: String,
    ttl: u32,
    class: RecordClass,
    record_type: RecordType,
    rdata: Vec<String>,
}

impl RecordSetBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com".to_string(),
            ttl: 60,
            class: RecordClass::IN,
            record_type: RecordType::A,
            rdata: vec!["192.0.2.1".to_string()],
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn class(mut self, class: RecordClass) -> Self {
        self.class = class;
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn rdata(mut self, rdata: &[&str]) -> Self {
        self.rdata = rdata.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn try_build(self) -> Result<RecordSet, DomainError> {
        RecordSet::from_text(
            &self.name,
            self.ttl,
            self.class,
            self.record_type,
            self.rdata.iter().map(String::as_str),
        )
    }

    pub fn build(self) -> RecordSet {
        self.try_build().unwrap()
    }
}

impl Default for RecordSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
