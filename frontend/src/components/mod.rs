pub mod modal_dom;
pub mod waitlist_modal;
