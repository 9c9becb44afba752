//! Vendor and client registration
//!
//! Two steps: the details form sends the signup request, after which the
//! backend mails a one-time password. The OTP step sends the same details
//! back with the code. Admin accounts are not self-registered.

use crate::context::PortalContext;
use crate::error::{PortalError, Result};
use eventmart_api_client::{Ack, OtpVerification, SignupRequest};
use eventmart_core::validation::{validate_otp, validate_signup, FieldErrors, SignupFields};
use eventmart_core::Role;
use eventmart_query::{client, vendor, Mutation};
use tracing::info;

const OTP_SENT: &str = "OTP sent to your email";
const VERIFIED: &str = "Account verified, please log in";
const OTP_RESENT: &str = "A new OTP has been sent";

/// Where the flow currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    Details,
    Otp,
    Done,
}

pub struct SignupFlow {
    role: Role,
    step: SignupStep,
    fields: SignupFields,
    address: Option<String>,
    otp: String,
    errors: FieldErrors,
    submitted: Option<SignupRequest>,
    signup: Mutation<SignupRequest, Ack>,
    verify: Mutation<OtpVerification, Ack>,
    resend: Mutation<String, Ack>,
    ctx: PortalContext,
}

impl SignupFlow {
    pub fn vendor(ctx: PortalContext) -> Self {
        let api = ctx.client.vendor();
        Self::build(
            Role::Vendor,
            vendor::signup_mutation(api.clone()),
            vendor::verify_otp_mutation(api.clone()),
            vendor::resend_otp_mutation(api),
            ctx,
        )
    }

    pub fn client(ctx: PortalContext) -> Self {
        let api = ctx.client.client();
        Self::build(
            Role::Client,
            client::signup_mutation(api.clone()),
            client::verify_otp_mutation(api.clone()),
            client::resend_otp_mutation(api),
            ctx,
        )
    }

    fn build(
        role: Role,
        signup: Mutation<SignupRequest, Ack>,
        verify: Mutation<OtpVerification, Ack>,
        resend: Mutation<String, Ack>,
        ctx: PortalContext,
    ) -> Self {
        Self {
            role,
            step: SignupStep::Details,
            fields: SignupFields::default(),
            address: None,
            otp: String::new(),
            errors: FieldErrors::new(),
            submitted: None,
            signup,
            verify,
            resend,
            ctx,
        }
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn fields_mut(&mut self) -> &mut SignupFields {
        &mut self.fields
    }

    /// Vendors give a business address; optional for clients
    pub fn set_address(&mut self, address: impl Into<String>) {
        let address = address.into();
        self.address = (!address.trim().is_empty()).then_some(address);
    }

    pub fn set_otp(&mut self, otp: impl Into<String>) {
        self.otp = otp.into();
    }

    pub fn is_loading(&self) -> bool {
        self.signup.is_loading() || self.verify.is_loading() || self.resend.is_loading()
    }

    /// Send the details form; moves to the OTP step on success
    pub async fn submit_details(&mut self) -> Result<()> {
        if self.step != SignupStep::Details {
            return Err(PortalError::State("Signup details were already submitted"));
        }
        self.errors = validate_signup(&self.fields);
        if !self.errors.is_empty() {
            return Err(PortalError::Invalid(self.errors.clone()));
        }

        let request = SignupRequest {
            name: self.fields.name.trim().to_string(),
            email: self.fields.email.trim().to_string(),
            phone: self.fields.phone.clone(),
            password: self.fields.password.clone(),
            address: self.address.clone(),
        };

        let ack = self.notify_on_error(self.signup.trigger(request.clone()).await)?;
        self.ctx
            .notifier
            .success(ack.message.as_deref().unwrap_or(OTP_SENT));
        self.submitted = Some(request);
        self.step = SignupStep::Otp;
        Ok(())
    }

    /// Confirm the code; on success the user is sent to the login screen
    pub async fn submit_otp(&mut self) -> Result<()> {
        let Some(formdata) = self.submitted.clone().filter(|_| self.step == SignupStep::Otp) else {
            return Err(PortalError::State("No signup is awaiting an OTP"));
        };
        self.errors = validate_otp(&self.otp);
        if !self.errors.is_empty() {
            return Err(PortalError::Invalid(self.errors.clone()));
        }

        let verification = OtpVerification {
            formdata,
            entered_otp: self.otp.clone(),
        };
        let ack = self.notify_on_error(self.verify.trigger(verification).await)?;

        info!(role = %self.role, "Account verified");
        self.ctx
            .notifier
            .success(ack.message.as_deref().unwrap_or(VERIFIED));
        self.step = SignupStep::Done;
        self.ctx.navigator.navigate(self.role.login_route());
        Ok(())
    }

    /// Ask for another code
    pub async fn resend_otp(&mut self) -> Result<()> {
        let Some(email) = self
            .submitted
            .as_ref()
            .filter(|_| self.step == SignupStep::Otp)
            .map(|request| request.email.clone())
        else {
            return Err(PortalError::State("No signup is awaiting an OTP"));
        };

        let ack = self.notify_on_error(self.resend.trigger(email).await)?;
        self.ctx
            .notifier
            .success(ack.message.as_deref().unwrap_or(OTP_RESENT));
        Ok(())
    }

    fn notify_on_error<T>(&self, result: eventmart_api_client::ApiResult<T>) -> Result<T> {
        result.map_err(|e| {
            self.ctx.notifier.error(e.message());
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use eventmart_api_client::ClientConfig;
    use eventmart_session::{MemoryStore, RecordingNavigator};
    use std::sync::Arc;

    fn flow() -> SignupFlow {
        let ctx = PortalContext::new(
            ClientConfig::default().with_base_url("http://127.0.0.1:9"),
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
            Arc::new(RecordingNavigator::new()),
        )
        .unwrap();
        SignupFlow::vendor(ctx)
    }

    #[tokio::test]
    async fn test_mismatched_confirmation_blocks_signup() {
        let mut flow = flow();
        let fields = flow.fields_mut();
        fields.name = "Aurora Events".into();
        fields.email = "hello@aurora.io".into();
        fields.phone = "9876543210".into();
        fields.password = "Str0ng!Pass".into();
        fields.confirm_password = "Str0ng!Pas".into();

        let err = flow.submit_details().await.unwrap_err();
        assert_eq!(
            err.field_errors().unwrap().get("confirmPassword").map(String::as_str),
            Some("Passwords do not match")
        );
        assert_eq!(flow.step(), SignupStep::Details);
    }

    #[tokio::test]
    async fn test_otp_step_requires_details_first() {
        let mut flow = flow();
        flow.set_otp("123456");
        assert!(matches!(flow.submit_otp().await, Err(PortalError::State(_))));
        assert!(matches!(flow.resend_otp().await, Err(PortalError::State(_))));
    }

    #[test]
    fn test_blank_address_is_dropped() {
        let mut flow = flow();
        flow.set_address("   ");
        assert_eq!(flow.address, None);
        flow.set_address("12 Marine Drive, Kochi");
        assert_eq!(flow.address.as_deref(), Some("12 Marine Drive, Kochi"));
    }
}
