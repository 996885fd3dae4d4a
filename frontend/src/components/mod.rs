pub mod calendar_view;
pub mod date_picker;
pub mod day_detail;
pub mod input_field;
pub mod layout;
pub mod transaction_form;
