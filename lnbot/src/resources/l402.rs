use lnbot_proto::{
    CreateL402ChallengeRequest, L402Challenge, L402Payment, L402Verification, PayL402Request,
    VerifyL402Request,
};

use super::namespace;
use crate::error::{Error, Result};
use crate::request::{Request, endpoint};
use crate::transport::HttpTransport;
#[cfg(feature = "blocking")]
use crate::transport::BlockingTransport;

namespace! {
    /// L402 paywalls: issuing and verifying challenges as a seller, paying
    /// them as a buyer.
    L402
}

fn challenge_request(request: &CreateL402ChallengeRequest) -> Result<Request> {
    if request.amount == 0 {
        return Err(Error::InvalidInput("challenge amount must be greater than zero"));
    }
    endpoint!(POST "/v1/l402/challenges").json(request)
}

fn verify_request(request: &VerifyL402Request) -> Result<Request> {
    if request.authorization.trim().is_empty() {
        return Err(Error::InvalidInput("authorization must not be empty"));
    }
    endpoint!(POST "/v1/l402/verify").json(request)
}

fn pay_request(request: &PayL402Request) -> Result<Request> {
    if request.www_authenticate.trim().is_empty() {
        return Err(Error::InvalidInput("WWW-Authenticate value must not be empty"));
    }
    endpoint!(POST "/v1/l402/pay").json(request)
}

impl L402<'_, HttpTransport> {
    /// Creates a challenge to return with a `402 Payment Required`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn create_challenge(
        &self,
        request: &CreateL402ChallengeRequest,
    ) -> Result<L402Challenge> {
        self.transport.call(&challenge_request(request)?).await
    }

    /// Checks an `Authorization: L402 ...` header presented by a client.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails. An invalid token is reported
    /// in the result, not as an error.
    pub async fn verify(&self, request: &VerifyL402Request) -> Result<L402Verification> {
        self.transport.call(&verify_request(request)?).await
    }

    /// Pays a challenge and returns the header to retry the request with.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub async fn pay(&self, request: &PayL402Request) -> Result<L402Payment> {
        self.transport.call(&pay_request(request)?).await
    }
}

#[cfg(feature = "blocking")]
impl L402<'_, BlockingTransport> {
    /// Creates a challenge to return with a `402 Payment Required`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn create_challenge(&self, request: &CreateL402ChallengeRequest) -> Result<L402Challenge> {
        self.transport.call(&challenge_request(request)?)
    }

    /// Checks an `Authorization: L402 ...` header presented by a client.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails. An invalid token is reported
    /// in the result, not as an error.
    pub fn verify(&self, request: &VerifyL402Request) -> Result<L402Verification> {
        self.transport.call(&verify_request(request)?)
    }

    /// Pays a challenge and returns the header to retry the request with.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the call fails.
    pub fn pay(&self, request: &PayL402Request) -> Result<L402Payment> {
        self.transport.call(&pay_request(request)?)
    }
}
