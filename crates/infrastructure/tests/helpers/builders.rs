#![allow(dead_code)]
use hatedns_domain::{RecordClass, RecordSet, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType as WireType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub fn record_set(name: &str, record_type: RecordType, rdata: &[&str]) -> RecordSet {
    RecordSet::from_text(name, 60, RecordClass::IN, record_type, rdata.iter().copied()).unwrap()
}

/// An A RRset with `count` distinct addresses.
pub fn a_record_set(name: &str, count: usize) -> RecordSet {
    let addrs: Vec<String> = (0..count)
        .map(|i| format!("10.{}.{}.{}", i / 65536, (i / 256) % 256, i % 256))
        .collect();
    RecordSet::from_text(
        name,
        60,
        RecordClass::IN,
        RecordType::A,
        addrs.iter().map(String::as_str),
    )
    .unwrap()
}

pub fn query_bytes(id: u16, name: &str, record_type: WireType) -> Vec<u8> {
    multi_query_bytes(id, &[(name, record_type)])
}

/// A query carrying every `(name, type)` pair as a question, in order.
pub fn multi_query_bytes(id: u16, questions: &[(&str, WireType)]) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    for (name, record_type) in questions {
        let mut query = Query::new();
        query.set_name(Name::from_str(name).unwrap());
        query.set_query_type(*record_type);
        query.set_query_class(DNSClass::IN);
        message.add_query(query);
    }

    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}
