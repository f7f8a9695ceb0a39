//! Property-based tests for identity normalization

use integration_identity::{
    GitHubProfile, GoogleProfile, ProfileEmail, ProfilePhoto, ProviderProfile, normalize_identity,
};
use proptest::prelude::*;

fn google_profile(email: String) -> GoogleProfile {
    GoogleProfile {
        id: "1".to_string(),
        emails: vec![ProfileEmail {
            value: email,
            verified: Some(true),
        }],
        photos: vec![ProfilePhoto {
            value: "https://lh3.googleusercontent.com/a/p".to_string(),
        }],
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn google_login_is_text_before_at(
        local in "[a-z][a-z0-9._]{0,12}[a-z0-9]",
        domain in "[a-z]{2,10}\\.(com|org|dev)",
    ) {
        let email = format!("{local}@{domain}");
        let identity = normalize_identity(&ProviderProfile::Google(google_profile(email))).unwrap();
        prop_assert_eq!(identity.login, local);
    }

    #[test]
    fn github_without_emails_never_synthesizes_one(
        id in "[0-9]{1,9}",
        login in "[a-zA-Z][a-zA-Z0-9-]{0,20}",
    ) {
        let profile = GitHubProfile {
            id,
            username: login.clone(),
            ..Default::default()
        };
        let identity = normalize_identity(&ProviderProfile::GitHub(profile)).unwrap();
        prop_assert!(identity.email.is_none());
        prop_assert!(identity.avatar_url.is_none());
        prop_assert_eq!(identity.name, login);
    }

    #[test]
    fn github_extension_counts_round_trip_through_wire_form(
        followers in 0u64..10_000,
        repos in 0u64..500,
    ) {
        let profile = GitHubProfile {
            id: "1".to_string(),
            username: "octo".to_string(),
            raw: serde_json::json!({"followers": followers, "public_repos": repos}),
            ..Default::default()
        };
        let identity = normalize_identity(&ProviderProfile::GitHub(profile)).unwrap();
        let json = identity.to_json().unwrap();
        let decoded = domain::UserIdentity::from_json(&json).unwrap();
        prop_assert_eq!(decoded.github().and_then(|g| g.followers), Some(followers));
        prop_assert_eq!(decoded, identity);
    }
}
