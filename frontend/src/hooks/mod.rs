pub mod use_auth;
pub mod use_calendar;
pub mod use_click_outside;
pub mod use_date_format;
pub mod use_finance_data;
pub mod use_theme;
