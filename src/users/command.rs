pub mod sign_up_cmd;
