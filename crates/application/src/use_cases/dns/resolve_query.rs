use crate::ports::RecordStore;
use hatedns_domain::{DomainError, Question, RecordSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Matches request questions against the record store.
///
/// Resolution is all-or-nothing: one unanswerable question fails the whole
/// batch with `NotFound` and no partial answers are returned. Store faults
/// propagate unchanged.
pub struct ResolveQueryUseCase {
    store: Arc<dyn RecordStore>,
}

impl ResolveQueryUseCase {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Returns one RRset per question, in question order.
    #[instrument(skip_all, fields(questions = questions.len()))]
    pub async fn execute(&self, questions: &[Question]) -> Result<Vec<RecordSet>, DomainError> {
        let mut answers = Vec::with_capacity(questions.len());

        for question in questions {
            let Some(key) = question.key() else {
                debug!(question = %question, "Question cannot match a stored record");
                return Err(DomainError::NotFound(question.to_string()));
            };

            match self.store.get(&key).await? {
                Some(rrset) => answers.push(rrset),
                None => {
                    debug!(question = %question, "No record for question");
                    return Err(DomainError::NotFound(question.to_string()));
                }
            }
        }

        debug!(answers = answers.len(), "All questions answered");
        Ok(answers)
    }
}
