mod daily_report_service;
mod webserver_service;

pub use daily_report_service::DailyReportService;
pub use webserver_service::WebserverService;
