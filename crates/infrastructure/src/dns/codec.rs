//! Conversions between hickory-proto wire messages and domain types.

use hatedns_domain::{DomainError, Question, RecordClass, RecordData, RecordSet};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{sshfp, tlsa};
use hickory_proto::rr::{rdata, DNSClass, Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Largest reply sent over UDP.
pub const UDP_MAX_MESSAGE_SIZE: usize = 512;
/// Largest reply sent over TCP, bounded by the 2-byte length prefix.
pub const TCP_MAX_MESSAGE_SIZE: usize = 65535;

const TC_FLAG: u8 = 0x02;

pub fn parse_message(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes).map_err(|e| DomainError::MalformedMessage(e.to_string()))
}

/// Extracts the question section. Class and type codes are kept raw so that
/// unknown values can be answered as misses.
pub fn questions(message: &Message) -> Result<Vec<Question>, DomainError> {
    message
        .queries()
        .iter()
        .map(|query| {
            Question::new(
                &query.name().to_ascii(),
                u16::from(query.query_class()),
                u16::from(query.query_type()),
            )
        })
        .collect()
}

/// Response skeleton for `request`: same id, opcode, RD bit and questions,
/// with QR set and no answers.
pub fn response_for(request: &Message) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    for query in request.queries() {
        response.add_query(query.clone());
    }
    response
}

/// SERVFAIL reply for a frame that could not be parsed. The id is recovered
/// from the first two bytes when present.
pub fn servfail_for_raw(bytes: &[u8]) -> Message {
    let id = match bytes {
        [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
        _ => 0,
    };
    let mut response = Message::new(id, MessageType::Response, OpCode::Query);
    response.set_response_code(ResponseCode::ServFail);
    response
}

/// One wire record per rdata value of `rrset`.
pub fn to_records(rrset: &RecordSet) -> Result<Vec<Record>, DomainError> {
    let name = to_name(rrset.name())?;
    let class = match rrset.class() {
        RecordClass::IN => DNSClass::IN,
        RecordClass::CH => DNSClass::CH,
        RecordClass::HS => DNSClass::HS,
    };

    rrset
        .rdata()
        .iter()
        .map(|data| {
            let mut record = Record::from_rdata(name.clone(), rrset.ttl(), to_rdata(data)?);
            record.set_dns_class(class);
            Ok(record)
        })
        .collect()
}

fn to_rdata(data: &RecordData) -> Result<RData, DomainError> {
    Ok(match data {
        RecordData::A(addr) => RData::A(rdata::A(*addr)),
        RecordData::Aaaa(addr) => RData::AAAA(rdata::AAAA(*addr)),
        RecordData::Cname(target) => RData::CNAME(rdata::CNAME(to_name(target)?)),
        RecordData::Ns(target) => RData::NS(rdata::NS(to_name(target)?)),
        RecordData::Ptr(target) => RData::PTR(rdata::PTR(to_name(target)?)),
        RecordData::Mx {
            preference,
            exchange,
        } => RData::MX(rdata::MX::new(*preference, to_name(exchange)?)),
        RecordData::Dname(target) => RData::Unknown {
            code: RecordType::from(39),
            rdata: rdata::NULL::with(name_bytes(target)?),
        },
        RecordData::Txt(strings) => RData::TXT(rdata::TXT::new(strings.clone())),
        RecordData::Srv {
            priority,
            weight,
            port,
            target,
        } => RData::SRV(rdata::SRV::new(
            *priority,
            *weight,
            *port,
            to_name(target)?,
        )),
        RecordData::Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        } => RData::SOA(rdata::SOA::new(
            to_name(mname)?,
            to_name(rname)?,
            *serial,
            to_interval(*refresh)?,
            to_interval(*retry)?,
            to_interval(*expire)?,
            *minimum,
        )),
        RecordData::Hinfo { cpu, os } => RData::HINFO(rdata::HINFO::new(cpu.clone(), os.clone())),
        RecordData::Naptr {
            order,
            preference,
            flags,
            services,
            regexp,
            replacement,
        } => RData::NAPTR(rdata::NAPTR::new(
            *order,
            *preference,
            flags.as_bytes().into(),
            services.as_bytes().into(),
            regexp.as_bytes().into(),
            to_name(replacement)?,
        )),
        RecordData::Caa { flags, tag, value } => RData::Unknown {
            code: RecordType::CAA,
            rdata: rdata::NULL::with(caa_bytes(*flags, tag, value)),
        },
        RecordData::Sshfp {
            algorithm,
            fingerprint_type,
            fingerprint,
        } => RData::SSHFP(rdata::SSHFP::new(
            sshfp::Algorithm::from(*algorithm),
            sshfp::FingerprintType::from(*fingerprint_type),
            fingerprint.clone(),
        )),
        RecordData::Tlsa {
            usage,
            selector,
            matching_type,
            data,
        } => RData::TLSA(rdata::TLSA::new(
            tlsa::CertUsage::from(*usage),
            tlsa::Selector::from(*selector),
            tlsa::Matching::from(*matching_type),
            data.clone(),
        )),
    })
}

fn to_interval(seconds: u32) -> Result<i32, DomainError> {
    i32::try_from(seconds)
        .map_err(|_| DomainError::Internal(format!("SOA interval {} out of range", seconds)))
}

/// Uncompressed wire form of `name`, for rdata hickory has no type for.
fn name_bytes(name: &str) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    to_name(name)?
        .emit(&mut encoder)
        .map_err(|e| DomainError::Internal(format!("unencodable name {}: {}", name, e)))?;
    Ok(buf)
}

/// CAA rdata: flags, tag length, tag, then the value up to the end.
fn caa_bytes(flags: u8, tag: &str, value: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + tag.len() + value.len());
    buf.push(flags);
    buf.push(tag.len() as u8);
    buf.extend_from_slice(tag.as_bytes());
    buf.extend_from_slice(value.as_bytes());
    buf
}

fn to_name(name: &str) -> Result<Name, DomainError> {
    Name::from_ascii(name)
        .map_err(|e| DomainError::Internal(format!("unencodable name {}: {}", name, e)))
}

pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(UDP_MAX_MESSAGE_SIZE);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::Internal(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}

/// Encodes `message` in at most `limit` bytes.
///
/// An oversized message keeps the longest prefix of its answer section that
/// fits and gets the TC flag. If not even the bare header and questions fit,
/// the questions are dropped too, and as a last resort the header bytes are
/// cut at `limit`.
pub fn encode_within(message: &Message, limit: usize) -> Result<Vec<u8>, DomainError> {
    if let Ok(bytes) = encode(message) {
        if bytes.len() <= limit {
            return Ok(bytes);
        }
    }

    let queries = message.queries();
    let answers = message.answers();
    let fits = |count: usize| -> Option<Vec<u8>> {
        encode(&truncated_copy(message, queries, &answers[..count]))
            .ok()
            .filter(|bytes| bytes.len() <= limit)
    };

    let Some(mut best) = fits(0) else {
        let mut bytes = encode(&truncated_copy(message, &[], &[]))?;
        if bytes.len() > limit {
            bytes.truncate(limit);
            if let Some(flags) = bytes.get_mut(2) {
                *flags |= TC_FLAG;
            }
        }
        return Ok(bytes);
    };

    // `lo` answers always fit and `hi` answers never do.
    let (mut lo, mut hi) = (0, answers.len());
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        match fits(mid) {
            Some(bytes) => {
                best = bytes;
                lo = mid;
            }
            None => hi = mid,
        }
    }

    Ok(best)
}

fn truncated_copy(template: &Message, queries: &[Query], answers: &[Record]) -> Message {
    let mut message = Message::new(template.id(), MessageType::Response, template.op_code());
    message.set_recursion_desired(template.recursion_desired());
    message.set_response_code(template.response_code());
    message.set_truncated(true);
    for query in queries {
        message.add_query(query.clone());
    }
    for answer in answers {
        message.add_answer(answer.clone());
    }
    message
}
