use super::codec;
use hatedns_application::use_cases::ResolveQueryUseCase;
use hatedns_domain::{DomainError, ErrorKind};
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Turns request messages into responses. Shared by the UDP and TCP
/// listeners, which differ only in framing and size limits.
pub struct DnsQueryHandler {
    resolver: Arc<ResolveQueryUseCase>,
}

impl DnsQueryHandler {
    pub fn new(resolver: Arc<ResolveQueryUseCase>) -> Self {
        Self { resolver }
    }

    pub async fn handle(&self, request: &Message) -> Message {
        let mut response = codec::response_for(request);

        let questions = match codec::questions(request) {
            Ok(questions) => questions,
            Err(e) => {
                debug!(error = %e, "Question section cannot be represented");
                response.set_response_code(response_code_for(&e));
                return response;
            }
        };

        let answers = match self.resolver.execute(&questions).await {
            Ok(answers) => answers,
            Err(e) => {
                if e.is_not_found() {
                    debug!(id = request.id(), "Answering NXDOMAIN");
                } else {
                    error!(id = request.id(), error = %e, "Query resolution failed");
                }
                response.set_response_code(response_code_for(&e));
                return response;
            }
        };

        for rrset in &answers {
            match codec::to_records(rrset) {
                Ok(records) => {
                    for record in records {
                        response.add_answer(record);
                    }
                }
                Err(e) => {
                    error!(key = %rrset.key(), error = %e, "Stored record set cannot be encoded");
                    let mut failure = codec::response_for(request);
                    failure.set_response_code(ResponseCode::ServFail);
                    return failure;
                }
            }
        }

        debug!(
            id = request.id(),
            answers = response.answers().len(),
            "Answering NOERROR"
        );
        response
    }

    /// Reply bytes for one UDP datagram, or `None` when the datagram is not
    /// a DNS message and should be dropped.
    pub async fn handle_datagram(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        let request = match codec::parse_message(datagram) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, len = datagram.len(), "Dropping unparsable datagram");
                return None;
            }
        };

        let response = self.handle(&request).await;
        Self::encode_or_log(&response, codec::UDP_MAX_MESSAGE_SIZE)
    }

    /// Reply bytes for one TCP frame. Unparsable frames get a SERVFAIL.
    pub async fn handle_frame(&self, frame: &[u8]) -> Option<Vec<u8>> {
        let response = match codec::parse_message(frame) {
            Ok(request) => self.handle(&request).await,
            Err(e) => {
                warn!(error = %e, len = frame.len(), "Unparsable TCP frame");
                codec::servfail_for_raw(frame)
            }
        };

        Self::encode_or_log(&response, codec::TCP_MAX_MESSAGE_SIZE)
    }

    fn encode_or_log(response: &Message, limit: usize) -> Option<Vec<u8>> {
        match codec::encode_within(response, limit) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(id = response.id(), error = %e, "Failed to encode response");
                None
            }
        }
    }
}

fn response_code_for(error: &DomainError) -> ResponseCode {
    match error.kind() {
        ErrorKind::NotFound => ResponseCode::NXDomain,
        ErrorKind::MalformedInput
        | ErrorKind::UnsupportedOperation
        | ErrorKind::InternalFault => ResponseCode::ServFail,
    }
}
