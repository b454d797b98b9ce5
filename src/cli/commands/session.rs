use crate::config::Config;
use crate::core::logger::SessionLogger;
use crate::core::session::SessionLogic;
use crate::core::timer::SessionTimer;
use crate::errors::AppResult;
use std::io;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut timer = SessionTimer::new();
    let logger = SessionLogger::new(cfg.store_paths());

    SessionLogic::run(&mut timer, &logger, cfg, io::stdin().lock())
}
