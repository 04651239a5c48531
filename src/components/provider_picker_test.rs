use super::*;

#[test]
fn button_labels_match_provider_names() {
    let labels: Vec<String> = Provider::PICKER_ORDER
        .into_iter()
        .map(provider_button_label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "Login with Google",
            "Login with GitHub",
            "Login with Okta",
            "Login with OpenID Connect",
            "Login with Microsoft",
        ]
    );
}

#[test]
fn button_class_carries_provider_id() {
    assert_eq!(
        provider_button_class(Provider::GenericOidc),
        "provider-button provider-button--generic_oidc"
    );
}

#[test]
fn status_text_only_for_non_picker_views() {
    assert_eq!(status_text(&PickerView::Proxy), Some(PROXY_NOTICE));
    assert!(status_text(&PickerView::Loading).is_some());
    assert_eq!(status_text(&PickerView::Empty), None);
    assert_eq!(
        status_text(&PickerView::Providers(vec![Provider::Google])),
        None
    );
}
