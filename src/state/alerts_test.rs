use super::*;

#[test]
fn alert_without_close_affordance_stays() {
    assert!(!AlertSnapshot::default().auto_dismiss());
}

#[test]
fn dismissible_class_or_close_control_qualifies() {
    assert!(AlertSnapshot { dismissible_class: true, has_close_control: false }.auto_dismiss());
    assert!(AlertSnapshot { dismissible_class: false, has_close_control: true }.auto_dismiss());
}

#[test]
fn dismissible_picks_only_closable_alerts() {
    let alerts = [
        AlertSnapshot { dismissible_class: true, has_close_control: true },
        AlertSnapshot::default(),
        AlertSnapshot { dismissible_class: false, has_close_control: true },
    ];
    assert_eq!(dismissible(&alerts), vec![0, 2]);
}

#[test]
fn no_alerts_means_nothing_to_close() {
    assert!(dismissible(&[]).is_empty());
}
