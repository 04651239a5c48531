pub mod about;
pub mod home;
pub mod lookup;
pub mod recent;
pub mod sharex;
pub mod visitors;
