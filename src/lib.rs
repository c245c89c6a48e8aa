pub mod core {
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod library;
    pub mod repository;
}

pub mod utils {
    pub mod date;
    pub mod ddb;
    pub mod logs;
    pub mod memory;
}

pub mod books {
    pub mod domain;
    pub mod dto;
    pub mod factory;
    pub mod repository;
}

pub mod catalog {
    pub mod command {
        pub mod create_book_cmd;
        pub mod delete_book_cmd;
        pub mod get_all_books_cmd;
        pub mod get_book_cmd;
        pub mod update_book_cmd;
    }
    pub mod controller;
    pub mod domain;
    pub mod dto;
    pub mod factory;
}

pub mod server;
pub mod storage;
pub mod users;
