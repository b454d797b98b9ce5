#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Local, TimeZone};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use worklogger::core::clock::ManualClock;
use worklogger::store::StorePaths;

/// Create a fresh, empty temp directory for one test
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("worklogger_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Store paths inside a fresh temp directory (files not created)
pub fn temp_stores(name: &str) -> StorePaths {
    let dir = temp_dir(name);
    StorePaths::new(dir.join("time_log.xlsx"), dir.join("time_log.csv"))
}

/// The binary, with HOME pointed at `home` so no real config is read
pub fn wl(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("worklogger");
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

/// A manual clock on Monday 2025-03-10 09:00:00 (ISO week 11)
pub fn monday_clock() -> ManualClock {
    ManualClock::new(Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap())
}

/// Lines of a text file, without line terminators
pub fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read text file")
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
