use super::*;

#[test]
fn notice_class_distinguishes_levels() {
    assert_eq!(notice_class(NoticeLevel::Error), "notice notice--error");
    assert_eq!(notice_class(NoticeLevel::Info), "notice notice--info");
}
