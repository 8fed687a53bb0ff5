//! Authentication use case.
//!
//! `AuthUseCase` drives the login/signup screen and the header's user menu:
//! it validates forms, talks to the identity provider and the profile store,
//! and leaves session state to the [`SessionManager`].

use eduhub_core::error::{EduhubError, Result};
use eduhub_core::identity::{Identity, IdentityProvider, Persistence};
use eduhub_core::profile::ProfileStore;
use eduhub_core::session::{SessionManager, SessionState};
use eduhub_core::user::{LoginForm, SignupForm, UserProfile, UserRole, ValidationErrors};
use std::sync::Arc;

/// Use case for signing up, signing in and out, demo mode and profile edits.
///
/// # Responsibilities
///
/// - Validating login and signup forms before any backend call
/// - Creating the profile record of a new account
/// - Waiting for the session to reflect a sign-in before returning
/// - Guarding profile edits (no role change, nothing saved in demo mode)
pub struct AuthUseCase {
    identity_provider: Arc<dyn IdentityProvider>,
    profile_store: Arc<dyn ProfileStore>,
    session: SessionManager,
}

impl AuthUseCase {
    /// Creates a new `AuthUseCase`.
    ///
    /// `session` must have been started with the same provider and store.
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        profile_store: Arc<dyn ProfileStore>,
        session: SessionManager,
    ) -> Self {
        Self {
            identity_provider,
            profile_store,
            session,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Creates an account and its profile record, leaving the new user signed in.
    ///
    /// Returns the uid issued by the identity provider.
    ///
    /// # Errors
    ///
    /// - `EduhubError::Validation` with every rejected field; nothing is created
    /// - `EduhubError::EmailInUse` if the email already has an account
    /// - the store's error if the profile could not be written after registration
    pub async fn sign_up(&self, form: &SignupForm) -> Result<String> {
        form.validate()?;

        let identity = self
            .identity_provider
            .register(&form.email, &form.password)
            .await?;
        let profile = form.to_profile(identity.uid.clone());

        // Written straight to the store: the session may not have seen the new identity yet.
        if let Err(e) = self.profile_store.put(&identity.uid, &profile).await {
            tracing::error!("Account {} created but its profile was not saved: {}", identity.uid, e);
            return Err(e);
        }
        tracing::info!("Signed up {} as {}", identity.uid, profile.role);

        // The session may have looked the profile up before it was written.
        let state = self.wait_for_resolution(&identity).await?;
        if state.identity.as_ref() == Some(&identity) && state.profile.is_none() {
            self.session.set_profile(profile).await?;
        }

        Ok(identity.uid)
    }

    /// Signs in and returns the session once the profile lookup has finished.
    ///
    /// # Errors
    ///
    /// - `EduhubError::Validation` for a malformed email or short password
    /// - `EduhubError::InvalidCredentials` from the provider
    /// - `EduhubError::Internal` if the session was shut down
    pub async fn log_in(&self, form: &LoginForm) -> Result<SessionState> {
        form.validate()?;

        let persistence = Persistence::from_remember_me(form.remember_me);
        let identity = self
            .identity_provider
            .sign_in(&form.email, &form.password, persistence)
            .await?;
        tracing::info!("Logged in {} ({})", identity.uid, persistence);

        self.wait_for_resolution(&identity).await
    }

    /// Ends a running demo and signs out of the provider.
    pub async fn log_out(&self) -> Result<()> {
        if self.session.end_demo() {
            tracing::info!("Demo session ended by logout");
        }

        if self.identity_provider.current().is_some() {
            self.identity_provider.sign_out().await?;
            self.session.wait_for(|state| state.identity.is_none()).await?;
            tracing::info!("Logged out");
        }
        Ok(())
    }

    pub fn start_demo(&self, role: UserRole) {
        self.session.start_demo(role);
    }

    /// Returns false when no demo was running.
    pub fn end_demo(&self) -> bool {
        self.session.end_demo()
    }

    /// Saves an edited profile for the signed-in user.
    ///
    /// # Errors
    ///
    /// - `EduhubError::DemoSession` while a demo is running
    /// - `EduhubError::Unauthenticated` if nobody is signed in
    /// - `EduhubError::Validation` on `uid` if the record belongs to another account,
    ///   on `role` if the role would change or fields of another role are filled
    /// - the store's error from the session manager
    pub async fn update_profile(&self, profile: UserProfile) -> Result<()> {
        let state = self.session.state();
        if state.is_demo_active() {
            return Err(EduhubError::DemoSession(
                "profile changes are not saved".to_string(),
            ));
        }
        let identity = state.identity.ok_or(EduhubError::Unauthenticated)?;

        if profile.uid != identity.uid {
            let errors = ValidationErrors::single("uid", "Profile belongs to another account");
            return Err(errors.into());
        }
        if state
            .profile
            .as_ref()
            .is_some_and(|current| current.role != profile.role)
        {
            return Err(ValidationErrors::single("role", "Role cannot be changed").into());
        }
        if !profile.has_consistent_role_fields() {
            return Err(ValidationErrors::single(
                "role",
                "Profile has fields that do not belong to its role",
            )
            .into());
        }

        self.session.set_profile(profile).await
    }

    async fn wait_for_resolution(&self, identity: &Identity) -> Result<SessionState> {
        self.session
            .wait_for(|state| state.identity.as_ref() == Some(identity) && !state.resolving)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eduhub_core::config::SessionSettings;
    use eduhub_core::user::RoleDetails;
    use eduhub_infrastructure::{InMemoryProfileStore, LocalIdentityProvider};

    // Store that rejects every write
    struct ReadOnlyProfileStore;

    #[async_trait]
    impl ProfileStore for ReadOnlyProfileStore {
        async fn get(&self, _uid: &str) -> Result<Option<UserProfile>> {
            Ok(None)
        }

        async fn put(&self, _uid: &str, _profile: &UserProfile) -> Result<()> {
            Err(EduhubError::data_access("read-only store"))
        }
    }

    fn usecase_with(store: Arc<dyn ProfileStore>) -> (AuthUseCase, Arc<LocalIdentityProvider>) {
        let provider = Arc::new(LocalIdentityProvider::in_memory());
        let session =
            SessionManager::start(provider.clone(), store.clone(), SessionSettings::default())
                .unwrap();
        (AuthUseCase::new(provider.clone(), store, session), provider)
    }

    fn usecase() -> (AuthUseCase, Arc<InMemoryProfileStore>) {
        let store = Arc::new(InMemoryProfileStore::new());
        let (usecase, _) = usecase_with(store.clone());
        (usecase, store)
    }

    fn teacher_form() -> SignupForm {
        SignupForm {
            email: "edna@example.com".to_string(),
            password: "apple123".to_string(),
            name: "Edna Krabappel".to_string(),
            phone_number: "5559876543".to_string(),
            location: "Springfield".to_string(),
            details: RoleDetails::Teacher {
                teaching_grades: vec!["4".to_string()],
                teaching_school: "Springfield Elementary".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_role_specific_profile() {
        let (usecase, store) = usecase();

        let uid = usecase.sign_up(&teacher_form()).await.unwrap();

        let stored = store.get(&uid).await.unwrap().unwrap();
        assert_eq!(stored.role, UserRole::Teacher);
        assert_eq!(stored.teaching_grades, Some(vec!["4".to_string()]));
        assert!(stored.age.is_none());
        assert!(stored.ceo_name.is_none());

        let state = usecase.session().state();
        assert_eq!(state.profile, Some(stored));
        assert!(state.has_access());
    }

    #[tokio::test]
    async fn test_invalid_signup_creates_nothing() {
        let (usecase, store) = usecase();
        let mut form = teacher_form();
        form.email = "not-an-email".to_string();
        form.details = RoleDetails::Teacher {
            teaching_grades: Vec::new(),
            teaching_school: "S".to_string(),
        };

        let err = usecase.sign_up(&form).await.unwrap_err();

        let errors = err.validation_errors().unwrap();
        assert_eq!(
            errors.message_for("email"),
            Some("Please enter a valid email address")
        );
        assert!(errors.message_for("teachingGrades").is_some());
        assert!(errors.message_for("teachingSchool").is_some());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sign_up_propagates_store_failure() {
        let (usecase, provider) = usecase_with(Arc::new(ReadOnlyProfileStore));

        let err = usecase.sign_up(&teacher_form()).await.unwrap_err();

        assert!(matches!(err, EduhubError::DataAccess(_)));
        // The account itself exists.
        assert!(provider.current().is_some());
    }

    #[tokio::test]
    async fn test_log_in_waits_for_profile() {
        let (usecase, _) = usecase();
        let uid = usecase.sign_up(&teacher_form()).await.unwrap();
        usecase.log_out().await.unwrap();
        assert!(usecase.session().state().profile.is_none());

        let state = usecase
            .log_in(&LoginForm::new("edna@example.com", "apple123", true))
            .await
            .unwrap();

        assert_eq!(state.profile.map(|p| p.uid), Some(uid));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_log_in_errors() {
        let (usecase, _) = usecase();
        usecase.sign_up(&teacher_form()).await.unwrap();
        usecase.log_out().await.unwrap();

        let err = usecase
            .log_in(&LoginForm::new("edna@example.com", "short", false))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = usecase
            .log_in(&LoginForm::new("edna@example.com", "wrong-password", false))
            .await
            .unwrap_err();
        assert!(matches!(err, EduhubError::InvalidCredentials));
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_out_ends_demo() {
        let (usecase, _) = usecase();
        usecase.session().wait_until_loaded().await.unwrap();
        usecase.start_demo(UserRole::School);
        assert!(usecase.session().state().is_demo_active());

        usecase.log_out().await.unwrap();

        let state = usecase.session().state();
        assert!(!state.is_demo_active());
        assert!(state.profile.is_none());
        assert!(!usecase.end_demo());
    }

    #[tokio::test]
    async fn test_update_profile_rules() {
        let (usecase, store) = usecase();
        let uid = usecase.sign_up(&teacher_form()).await.unwrap();
        let current = usecase.session().state().profile.unwrap();

        let mut promoted = current.clone();
        promoted.role = UserRole::School;
        let err = usecase.update_profile(promoted).await.unwrap_err();
        assert_eq!(
            err.validation_errors().and_then(|e| e.message_for("role")),
            Some("Role cannot be changed")
        );

        let mut moved = current.clone();
        moved.location = "Capital City".to_string();
        usecase.update_profile(moved.clone()).await.unwrap();
        assert_eq!(store.get(&uid).await.unwrap(), Some(moved));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_profile_rejected_in_demo() {
        let (usecase, store) = usecase();
        usecase.session().wait_until_loaded().await.unwrap();
        usecase.start_demo(UserRole::Student);

        let mut edited = UserProfile::demo(UserRole::Student);
        edited.name = "Not Saved".to_string();
        let err = usecase.update_profile(edited).await.unwrap_err();

        assert!(matches!(err, EduhubError::DemoSession(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_foreign_or_mixed_records() {
        let (usecase, store) = usecase();
        let uid = usecase.sign_up(&teacher_form()).await.unwrap();
        let current = usecase.session().state().profile.unwrap();

        let mut foreign = current.clone();
        foreign.uid = "someone-else".to_string();
        let err = usecase.update_profile(foreign).await.unwrap_err();
        assert!(
            err.validation_errors()
                .and_then(|e| e.message_for("uid"))
                .is_some()
        );

        let mut mixed = current.clone();
        mixed.ceo_name = Some("Chalmers".to_string());
        mixed.age = Some(30);
        let err = usecase.update_profile(mixed).await.unwrap_err();
        assert!(
            err.validation_errors()
                .and_then(|e| e.message_for("role"))
                .is_some()
        );

        assert_eq!(store.get(&uid).await.unwrap(), Some(current.clone()));
        assert_eq!(usecase.session().state().profile, Some(current));
    }

    #[tokio::test]
    async fn test_update_profile_requires_sign_in() {
        let (usecase, store) = usecase();
        usecase.session().wait_until_loaded().await.unwrap();

        let mut profile = UserProfile::demo(UserRole::Student);
        profile.uid = "nobody".to_string();
        let err = usecase.update_profile(profile).await.unwrap_err();

        assert!(err.is_unauthenticated());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_log_in_after_shutdown_fails_instead_of_hanging() {
        let (usecase, _) = usecase();
        usecase.sign_up(&teacher_form()).await.unwrap();
        usecase.log_out().await.unwrap();
        usecase.session().shutdown();

        let err = usecase
            .log_in(&LoginForm::new("edna@example.com", "apple123", false))
            .await
            .unwrap_err();
        assert!(matches!(err, EduhubError::Internal(_)));
    }
}
