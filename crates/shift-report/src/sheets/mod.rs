//! Spreadsheet persistence: the append-only gateway contract and its Google Sheets backend.

pub mod gateway;
pub mod google;

pub use gateway::{SheetError, SheetGateway, SheetRow};
pub use google::{GoogleSheetsClient, HttpsConnector};
