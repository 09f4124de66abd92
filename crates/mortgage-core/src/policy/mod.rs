pub mod down_payment;
