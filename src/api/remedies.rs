use super::{ApiClient, Session};
use crate::record::{ConsultationRequest, Customer, CustomerRecord, NewCustomer};
use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

impl ApiClient {
    /// Public remedies search used by the "My Remedies" lookup. No auth.
    pub fn search(&self, query: Option<&str>) -> Result<Vec<Customer>> {
        let mut request = self.agent().get(&self.url("/api/remedies"));
        if let Some(q) = query {
            request = request.query("q", q);
        }

        let response = request.call().context("Remedies search request failed")?;

        let records: Vec<CustomerRecord> = response
            .into_body()
            .read_json()
            .context("Failed to parse remedies search response")?;

        debug!(count = records.len(), "Remedies search returned");
        Ok(records.into_iter().map(CustomerRecord::normalize).collect())
    }

    /// Look up a single customer by Customer ID.
    ///
    /// Prefers an exact `customerId` (or backend id) match, falling back to
    /// the first search result, since the backend search is substring-based.
    pub fn find_customer(&self, customer_id: &str) -> Result<Option<Customer>> {
        let mut results = self.search(Some(customer_id))?;

        let exact = results.iter().position(|c| {
            c.customer_id == customer_id || c.id.as_deref() == Some(customer_id)
        });

        match exact {
            Some(index) => Ok(Some(results.swap_remove(index))),
            None => Ok(results.into_iter().next().map(|first| {
                debug!(
                    customer_id = %customer_id,
                    matched = %first.customer_id,
                    "No exact customer match; using first search result"
                );
                first
            })),
        }
    }

    /// Admin listing of customer/remedy records.
    pub fn list(&self, session: &Session, query: Option<&str>) -> Result<Vec<Customer>> {
        let mut request = self
            .agent()
            .get(&self.url("/api/remedies"))
            .header("Authorization", &session.bearer());
        if let Some(q) = query {
            request = request.query("q", q);
        }

        let response = request.call().context("Failed to list remedies")?;

        let records: Vec<CustomerRecord> = response
            .into_body()
            .read_json()
            .context("Failed to parse remedies list response")?;

        Ok(records.into_iter().map(CustomerRecord::normalize).collect())
    }

    pub fn create(&self, session: &Session, customer: &NewCustomer) -> Result<Customer> {
        let response = self
            .agent()
            .post(&self.url("/api/remedies"))
            .header("Authorization", &session.bearer())
            .send_json(customer)
            .context("Create failed")?;

        let record: CustomerRecord = response
            .into_body()
            .read_json()
            .context("Failed to parse create response")?;

        debug!(customer_id = %customer.customer_id, "Customer record created");
        Ok(record.normalize())
    }

    /// Update a record by backend id or Customer ID.
    ///
    /// The backend keys updates by its own `_id`. When the direct call 404s
    /// we assume the caller passed a Customer ID and resolve it first.
    pub fn update(
        &self,
        session: &Session,
        id_or_customer_id: &str,
        customer: &NewCustomer,
    ) -> Result<Customer> {
        match self.update_by_id(session, id_or_customer_id, customer) {
            Ok(updated) => Ok(updated),
            Err(err) if is_not_found(&err) => {
                let found = self
                    .find_customer(id_or_customer_id)?
                    .and_then(|c| c.id)
                    .with_context(|| format!("No customer matches '{id_or_customer_id}'"))?;

                debug!(
                    customer_id = %id_or_customer_id,
                    backend_id = %found,
                    "Resolved customer id for update"
                );
                self.update_by_id(session, &found, customer)
            }
            Err(err) => Err(err),
        }
    }

    fn update_by_id(
        &self,
        session: &Session,
        id: &str,
        customer: &NewCustomer,
    ) -> Result<Customer> {
        let response = self
            .agent()
            .put(&self.url(&format!("/api/remedies/{id}")))
            .header("Authorization", &session.bearer())
            .send_json(customer)
            .context("Update failed")?;

        let record: CustomerRecord = response
            .into_body()
            .read_json()
            .context("Failed to parse update response")?;

        Ok(record.normalize())
    }

    /// Delete a record by backend id or Customer ID, with the same
    /// resolution fallback as [`ApiClient::update`].
    pub fn delete(&self, session: &Session, id_or_customer_id: &str) -> Result<()> {
        match self.delete_by_id(session, id_or_customer_id) {
            Ok(()) => Ok(()),
            Err(err) if is_not_found(&err) => {
                let found = self
                    .find_customer(id_or_customer_id)?
                    .and_then(|c| c.id)
                    .with_context(|| format!("No customer matches '{id_or_customer_id}'"))?;

                self.delete_by_id(session, &found)
            }
            Err(err) => Err(err),
        }
    }

    fn delete_by_id(&self, session: &Session, id: &str) -> Result<()> {
        self.agent()
            .delete(&self.url(&format!("/api/remedies/{id}")))
            .header("Authorization", &session.bearer())
            .call()
            .context("Delete failed")?;

        debug!(id = %id, "Customer record deleted");
        Ok(())
    }

    /// Submit a consultation-booking request.
    pub fn submit_consultation(&self, request: &ConsultationRequest) -> Result<String> {
        let response = match self
            .agent()
            .post(&self.url("/api/consultations"))
            .send_json(request)
        {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(code)) => {
                warn!(status = code, "Consultation submission rejected");
                bail!("Failed to submit consultation (status {code})");
            }
            Err(err) => {
                return Err(err).context("Consultation submission request failed");
            }
        };

        let body: serde_json::Value = response
            .into_body()
            .read_json()
            .context("Failed to parse consultation response")?;

        Ok(body["message"]
            .as_str()
            .unwrap_or("Consultation request received")
            .to_string())
    }
}

/// The backend signals "no such record" with a plain 404.
fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<ureq::Error>(),
        Some(ureq::Error::StatusCode(404))
    )
}
