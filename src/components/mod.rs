pub mod notice_tray;
pub mod provider_picker;
pub mod user_menu;
