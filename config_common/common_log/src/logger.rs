/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use crate::config::{LogConfig, LogFileConfig};
use chrono::{DateTime, Local};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger as SizeBasedTriggerPolicy;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::Append;
use log4rs::{
    append::rolling_file::RollingFileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config, Handle,
};

const ROOT_APPENDER: &str = "root_appender";

pub struct Logger {
    handle: Handle,
}

impl Logger {
    pub fn new_from_config(config: &LogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let handle = log4rs::init_config(Self::build_config(config)?)?;
        Ok(Self { handle })
    }

    /// Replaces the active configuration of an installed logger.
    pub fn reconfigure(&self, config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
        self.handle.set_config(Self::build_config(config)?);
        Ok(())
    }

    /// Builds the log4rs configuration without installing it.
    pub fn build_config(config: &LogConfig) -> Result<Config, Box<dyn std::error::Error>> {
        let appender: Box<dyn Append> = match &config.file {
            Some(file) => Box::new(Self::create_file_appender(file, &config.pattern)?),
            None => Box::new(
                ConsoleAppender::builder()
                    .encoder(Box::new(PatternEncoder::new(&config.pattern)))
                    .build(),
            ),
        };

        let mut log4rs_config = Config::builder().appender(Appender::builder().build(ROOT_APPENDER, appender));
        for logger_config in &config.loggers {
            let logger = log4rs::config::Logger::builder()
                .build(logger_config.path_prefix.clone(), Self::parse_level(&logger_config.level));
            log4rs_config = log4rs_config.logger(logger);
        }

        let root = Root::builder()
            .appender(ROOT_APPENDER)
            .build(Self::parse_level(&config.level));
        Ok(log4rs_config.build(root)?)
    }

    fn create_file_appender(
        config: &LogFileConfig,
        pattern: &str,
    ) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&config.log_directory)?;

        let now: DateTime<Local> = Local::now();
        let formatted_time = now.format("%Y%m%d%H%M%S%3f").to_string();

        let log_file = format!("{}/{}", config.log_directory, config.log_file_name);
        let archived_log_pattern = format!(
            "{}/{}-{{}}-{}.gz",
            config.log_directory, config.log_file_name, formatted_time
        );

        let size_trigger = SizeBasedTriggerPolicy::new(config.max_file_size);
        let roller = FixedWindowRoller::builder().build(&archived_log_pattern, config.max_zip_count)?;
        let compound_policy = CompoundPolicy::new(Box::new(size_trigger), Box::new(roller));

        let appender = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build(log_file, Box::new(compound_policy))?;

        Ok(appender)
    }

    pub fn parse_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }
}
