use super::name::absolutify;
use super::RecordType;
use crate::DomainError;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

const MAX_CHARACTER_STRING: usize = 255;

/// Type-specific payload of a single resource record.
///
/// `Display` produces the canonical presentation form; feeding that form back
/// through [`RecordData::parse`] yields an equal value, which is what the
/// store relies on when it persists rdata as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(String),
    Ns(String),
    Ptr(String),
    Dname(String),
    Mx {
        preference: u16,
        exchange: String,
    },
    /// One or more character-strings, each at most 255 bytes.
    Txt(Vec<String>),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Soa {
        mname: String,
        rname: String,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Hinfo {
        cpu: String,
        os: String,
    },
    Naptr {
        order: u16,
        preference: u16,
        flags: String,
        services: String,
        regexp: String,
        replacement: String,
    },
    Caa {
        flags: u8,
        tag: String,
        value: String,
    },
    Sshfp {
        algorithm: u8,
        fingerprint_type: u8,
        fingerprint: Vec<u8>,
    },
    Tlsa {
        usage: u8,
        selector: u8,
        matching_type: u8,
        data: Vec<u8>,
    },
}

impl RecordData {
    pub fn parse(record_type: RecordType, text: &str) -> Result<Self, DomainError> {
        let text = text.trim();
        if text.chars().any(|c| c.is_control()) {
            return Err(invalid(text, "control characters are not allowed"));
        }

        match record_type {
            RecordType::A => text
                .parse::<Ipv4Addr>()
                .map(RecordData::A)
                .map_err(|_| invalid(text, "not an IPv4 address")),
            RecordType::AAAA => text
                .parse::<Ipv6Addr>()
                .map(RecordData::Aaaa)
                .map_err(|_| invalid(text, "not an IPv6 address")),
            RecordType::CNAME => parse_target(text).map(RecordData::Cname),
            RecordType::NS => parse_target(text).map(RecordData::Ns),
            RecordType::PTR => parse_target(text).map(RecordData::Ptr),
            RecordType::DNAME => parse_target(text).map(RecordData::Dname),
            RecordType::MX => {
                let [preference, exchange] = fields::<2>(text)?;
                Ok(RecordData::Mx {
                    preference: parse_number(preference, "preference")?,
                    exchange: parse_target(exchange)?,
                })
            }
            RecordType::TXT => {
                let strings = character_strings(text)?;
                if strings.is_empty() {
                    return Err(invalid(text, "expected at least one character-string"));
                }
                for s in &strings {
                    check_length(text, s)?;
                }
                Ok(RecordData::Txt(strings))
            }
            RecordType::SRV => {
                let [priority, weight, port, target] = fields::<4>(text)?;
                Ok(RecordData::Srv {
                    priority: parse_number(priority, "priority")?,
                    weight: parse_number(weight, "weight")?,
                    port: parse_number(port, "port")?,
                    target: parse_target(target)?,
                })
            }
            RecordType::SOA => {
                let [mname, rname, serial, refresh, retry, expire, minimum] = fields::<7>(text)?;
                Ok(RecordData::Soa {
                    mname: parse_target(mname)?,
                    rname: parse_target(rname)?,
                    serial: parse_number(serial, "serial")?,
                    refresh: parse_interval(refresh, "refresh")?,
                    retry: parse_interval(retry, "retry")?,
                    expire: parse_interval(expire, "expire")?,
                    minimum: parse_number(minimum, "minimum")?,
                })
            }
            RecordType::HINFO => {
                let [cpu, os] = exactly::<2>(text, character_strings(text)?)?;
                check_length(text, &cpu)?;
                check_length(text, &os)?;
                Ok(RecordData::Hinfo { cpu, os })
            }
            RecordType::NAPTR => {
                let ([order, preference], rest) = leading::<2>(text)?;
                let [flags, services, regexp, replacement] =
                    exactly::<4>(text, character_strings(rest)?)?;
                for s in [&flags, &services, &regexp] {
                    check_length(text, s)?;
                }
                Ok(RecordData::Naptr {
                    order: parse_number(order, "order")?,
                    preference: parse_number(preference, "preference")?,
                    flags,
                    services,
                    regexp,
                    replacement: parse_target(&replacement)?,
                })
            }
            RecordType::CAA => {
                let ([flags, tag], rest) = leading::<2>(text)?;
                if tag.is_empty()
                    || tag.len() > MAX_CHARACTER_STRING
                    || !tag.chars().all(|c| c.is_ascii_alphanumeric())
                {
                    return Err(invalid(text, "tag must be 1..=255 ASCII letters or digits"));
                }
                let [value] = exactly::<1>(text, character_strings(rest)?)?;
                Ok(RecordData::Caa {
                    flags: parse_number(flags, "flags")?,
                    tag: tag.to_ascii_lowercase(),
                    value,
                })
            }
            RecordType::SSHFP => {
                let ([algorithm, fingerprint_type], rest) = leading::<2>(text)?;
                Ok(RecordData::Sshfp {
                    algorithm: parse_number(algorithm, "algorithm")?,
                    fingerprint_type: parse_number(fingerprint_type, "fingerprint type")?,
                    fingerprint: parse_hex(text, rest)?,
                })
            }
            RecordType::TLSA => {
                let ([usage, selector, matching_type], rest) = leading::<3>(text)?;
                Ok(RecordData::Tlsa {
                    usage: parse_number(usage, "usage")?,
                    selector: parse_number(selector, "selector")?,
                    matching_type: parse_number(matching_type, "matching type")?,
                    data: parse_hex(text, rest)?,
                })
            }
            RecordType::ANY => Err(DomainError::UnsupportedRecordType(
                RecordType::ANY.to_string(),
            )),
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::Aaaa(_) => RecordType::AAAA,
            RecordData::Cname(_) => RecordType::CNAME,
            RecordData::Ns(_) => RecordType::NS,
            RecordData::Ptr(_) => RecordType::PTR,
            RecordData::Dname(_) => RecordType::DNAME,
            RecordData::Mx { .. } => RecordType::MX,
            RecordData::Txt(_) => RecordType::TXT,
            RecordData::Srv { .. } => RecordType::SRV,
            RecordData::Soa { .. } => RecordType::SOA,
            RecordData::Hinfo { .. } => RecordType::HINFO,
            RecordData::Naptr { .. } => RecordType::NAPTR,
            RecordData::Caa { .. } => RecordType::CAA,
            RecordData::Sshfp { .. } => RecordType::SSHFP,
            RecordData::Tlsa { .. } => RecordType::TLSA,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Cname(target)
            | RecordData::Ns(target)
            | RecordData::Ptr(target)
            | RecordData::Dname(target) => write!(f, "{}", target),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::Txt(strings) => {
                for (i, s) in strings.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write_quoted(f, s)?;
                }
                Ok(())
            }
            RecordData::Srv {
                priority,
                weight,
                port,
                target,
            } => write!(f, "{} {} {} {}", priority, weight, port, target),
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{} {} {} {} {} {} {}",
                mname, rname, serial, refresh, retry, expire, minimum
            ),
            RecordData::Hinfo { cpu, os } => {
                write_quoted(f, cpu)?;
                f.write_str(" ")?;
                write_quoted(f, os)
            }
            RecordData::Naptr {
                order,
                preference,
                flags,
                services,
                regexp,
                replacement,
            } => {
                write!(f, "{} {} ", order, preference)?;
                for s in [flags, services, regexp] {
                    write_quoted(f, s)?;
                    f.write_str(" ")?;
                }
                write!(f, "{}", replacement)
            }
            RecordData::Caa { flags, tag, value } => {
                write!(f, "{} {} ", flags, tag)?;
                write_quoted(f, value)
            }
            RecordData::Sshfp {
                algorithm,
                fingerprint_type,
                fingerprint,
            } => write!(
                f,
                "{} {} {}",
                algorithm,
                fingerprint_type,
                hex::encode(fingerprint)
            ),
            RecordData::Tlsa {
                usage,
                selector,
                matching_type,
                data,
            } => write!(
                f,
                "{} {} {} {}",
                usage,
                selector,
                matching_type,
                hex::encode(data)
            ),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\"")
}

fn invalid(text: &str, reason: &str) -> DomainError {
    DomainError::InvalidRdata(format!("{:?}: {}", text, reason))
}

fn parse_target(text: &str) -> Result<String, DomainError> {
    absolutify(text).map_err(|e| invalid(text, &e.to_string()))
}

fn parse_number<T: std::str::FromStr>(text: &str, field: &str) -> Result<T, DomainError> {
    text.parse::<T>()
        .map_err(|_| invalid(text, &format!("{} is out of range", field)))
}

/// SOA timers are signed 32-bit on the wire.
fn parse_interval(text: &str, field: &str) -> Result<u32, DomainError> {
    let value: u32 = parse_number(text, field)?;
    if value > i32::MAX as u32 {
        return Err(invalid(text, &format!("{} is out of range", field)));
    }
    Ok(value)
}

fn parse_hex(text: &str, digits: &str) -> Result<Vec<u8>, DomainError> {
    let digits: String = digits.split_whitespace().collect();
    if digits.is_empty() {
        return Err(invalid(text, "missing hex data"));
    }
    hex::decode(&digits).map_err(|e| invalid(text, &e.to_string()))
}

fn check_length(text: &str, s: &str) -> Result<(), DomainError> {
    if s.len() > MAX_CHARACTER_STRING {
        return Err(invalid(
            text,
            &format!("character-string longer than {} bytes", MAX_CHARACTER_STRING),
        ));
    }
    Ok(())
}

fn fields<const N: usize>(text: &str) -> Result<[&str; N], DomainError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    parts
        .try_into()
        .map_err(|_| invalid(text, &format!("expected {} fields", N)))
}

/// Splits off `N` whitespace-separated fields and returns them with the
/// remaining text.
fn leading<const N: usize>(text: &str) -> Result<([&str; N], &str), DomainError> {
    let mut rest = text.trim_start();
    let mut out = [""; N];
    for slot in out.iter_mut() {
        if rest.is_empty() {
            return Err(invalid(text, &format!("expected at least {} fields", N)));
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        *slot = &rest[..end];
        rest = rest[end..].trim_start();
    }
    Ok((out, rest))
}

fn exactly<const N: usize>(text: &str, strings: Vec<String>) -> Result<[String; N], DomainError> {
    strings
        .try_into()
        .map_err(|_| invalid(text, &format!("expected {} character-strings", N)))
}

/// Splits `text` into character-strings. Quoted strings may hold spaces;
/// a backslash escapes the next character in both forms.
fn character_strings(text: &str) -> Result<Vec<String>, DomainError> {
    let mut strings = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&first) = chars.peek() {
        if first.is_whitespace() {
            chars.next();
            continue;
        }

        let quoted = first == '"';
        if quoted {
            chars.next();
        }

        let mut value = String::new();
        let mut closed = !quoted;
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(invalid(text, "dangling escape")),
                },
                '"' if quoted => {
                    closed = true;
                    break;
                }
                c if !quoted && c.is_whitespace() => break,
                c => value.push(c),
            }
        }

        if !closed {
            return Err(invalid(text, "unterminated quoted string"));
        }
        strings.push(value);
    }

    Ok(strings)
}
