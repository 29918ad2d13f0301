// Copyright 2017 Dmytro Milinevskyi <dmilinevskyi@gmail.com>

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The logging configuration might be given either as a simple comma-separated
//! spec or as a JSON string.
//!
//! # Simple spec
//!
//! The spec string has a form of:
//!
//! ```ignore
//! token,token,...
//! ```
//!
//! Where each token is one of:
//!
//! * `<level>` - turns the level on; `fail` is an alias of `error`;
//! * `<level>:lines` - turns the level on and enables line annotation for it;
//! * `off` - turns all levels off;
//! * `project=<name>` - sets the project name;
//! * `filter=<suffix>` - drops annotated logs from sources ending with `suffix`.
//!
//! As soon as at least one level (or `off`) is mentioned the levels
//! that are not listed are turned off.
//!
//! # JSON spec
//!
//! ```json
//! {
//!     "project": "<project name>",
//!     "levels": ["<level>", ...],
//!     "lines": ["<level>", ...],
//!     "filters": ["<suffix>", ...]
//! }
//! ```
//!
//! All the fields are optional though the object must not be empty.
//!
//! The levels that are not listed in `levels` are turned off,
//! the levels that are not listed in `lines` are not annotated.
//!
//! The spec is read from the `LEVLOG` environment variable by [init](../fn.init.html).

extern crate serde_json;
use self::serde_json::Value;

use std::fmt;

use levels::LogLevel;

/// Parsed logging configuration.
///
/// `None` leaves the corresponding setting untouched when applied.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct Config {
    /// Project name.
    pub project: Option<String>,
    /// On/off state per level, indexed by [LogLevel::index](../levels/enum.LogLevel.html#method.index).
    pub levels: Option<[bool; 4]>,
    /// Line annotation per level.
    pub lines: Option<[bool; 4]>,
    /// Filtered source suffixes.
    pub filters: Vec<String>,
}

impl Config {
    fn level(&mut self, level: LogLevel) {
        self.levels.get_or_insert([false; 4])[level.index()] = true;
    }

    fn line(&mut self, level: LogLevel) {
        self.lines.get_or_insert([false; 4])[level.index()] = true;
    }
}

/// JSON spec parse failure.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum JsonError {
    /// Invalid JSON string.
    Json,
    /// The root is invalid.
    Root,
    /// The project name is invalid.
    Project,
    /// The array of levels is invalid.
    Levels,
    /// The array of annotated levels is invalid.
    Lines,
    /// The array of filters is invalid.
    Filters,
}

/// Generic spec parse failure.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ParseError {
    /// Invalid spec.
    Spec,
    /// Invalid log level.
    LogLevel,
    /// JSON parse error.
    Json(JsonError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::Spec => write!(f, "invalid logging spec"),
            ParseError::LogLevel => write!(f, "invalid log level"),
            ParseError::Json(ref err) => write!(f, "invalid JSON logging spec: {:?}", err),
        }
    }
}

fn json_levels(value: &Value, err: JsonError) -> Result<[bool; 4], ParseError> {
    let mut levels = [false; 4];
    for level in value.as_array().ok_or(ParseError::Json(err))? {
        let level: LogLevel = level.as_str()
            .ok_or(ParseError::Json(err))?.parse()
            .or(Err(ParseError::Json(err)))?;
        levels[level.index()] = true;
    }
    Ok(levels)
}

fn parse_json(json: &str) -> Result<Config, ParseError> {
    let spec: Value = serde_json::from_str(json)
        .or(Err(ParseError::Json(JsonError::Json)))?;
    let spec = spec.as_object()
        .ok_or(ParseError::Json(JsonError::Root))?;
    if spec.is_empty() {
        return Err(ParseError::Json(JsonError::Root));
    }

    let mut config = Config::default();

    if let Some(project) = spec.get("project") {
        config.project = Some(
            project.as_str()
                .ok_or(ParseError::Json(JsonError::Project))?
                .to_string()
        );
    }

    if let Some(levels) = spec.get("levels") {
        config.levels = Some(json_levels(levels, JsonError::Levels)?);
    }

    if let Some(lines) = spec.get("lines") {
        config.lines = Some(json_levels(lines, JsonError::Lines)?);
    }

    if let Some(filters) = spec.get("filters") {
        let filters = filters.as_array()
            .ok_or(ParseError::Json(JsonError::Filters))?;
        for filter in filters {
            let filter = filter.as_str()
                .ok_or(ParseError::Json(JsonError::Filters))?;
            if filter.is_empty() {
                return Err(ParseError::Json(JsonError::Filters));
            }
            config.filters.push(filter.to_string());
        }
    }

    Ok(config)
}

fn parse_token(config: &mut Config, token: &str) -> Result<(), ParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::Spec);
    }

    if let Some(pos) = token.find('=') {
        let (k, v) = (token[..pos].trim(), token[pos + 1..].trim());
        if v.is_empty() {
            return Err(ParseError::Spec);
        }
        match k {
            "project" => config.project = Some(v.to_string()),
            "filter" => config.filters.push(v.to_string()),
            _ => return Err(ParseError::Spec),
        }
        return Ok(());
    }

    if token == "off" {
        config.levels.get_or_insert([false; 4]);
        return Ok(());
    }

    let mut kv = token.split(':');
    let (level, flag) = (kv.next(), kv.next());
    if kv.next().is_some() {
        return Err(ParseError::Spec);
    }

    let level: LogLevel = level.unwrap_or("").parse()
        .or(Err(ParseError::LogLevel))?;
    config.level(level);

    match flag.map(str::trim) {
        None => {},
        Some("lines") => config.line(level),
        Some(_) => return Err(ParseError::Spec),
    }

    Ok(())
}

/// Parses either the simple or the JSON spec.
pub fn parse(spec: &str) -> Result<Config, ParseError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ParseError::Spec);
    }

    if spec.starts_with('{') {
        return parse_json(spec);
    }

    let mut config = Config::default();
    for token in spec.split(',') {
        parse_token(&mut config, token)?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_invalid() {
        assert_eq!(Err(ParseError::Spec), parse(""));
        assert_eq!(Err(ParseError::Spec), parse(","));
        assert_eq!(Err(ParseError::Spec), parse("info,"));
        assert_eq!(Err(ParseError::Spec), parse(",info"));
        assert_eq!(Err(ParseError::Spec), parse("project="));
        assert_eq!(Err(ParseError::Spec), parse("foo=bar"));
        assert_eq!(Err(ParseError::Spec), parse("info:bold"));
        assert_eq!(Err(ParseError::Spec), parse("info:lines:more"));
        assert_eq!(Err(ParseError::LogLevel), parse("trace"));
        assert_eq!(Err(ParseError::LogLevel), parse(":lines"));
        assert_eq!("Spec", format!("{:?}", parse("foo=bar").err().unwrap()));
        assert_eq!("invalid log level", parse("trace").err().unwrap().to_string());
    }

    #[test]
    fn test_spec_levels() {
        let expect = Config {
            levels: Some([true, false, true, true]),
            ..Default::default()
        };
        assert_eq!(Ok(expect), parse("info, fail,DEBUG"));

        let expect = Config {
            levels: Some([false; 4]),
            ..Default::default()
        };
        assert_eq!(Ok(expect), parse("off"));
    }

    #[test]
    fn test_spec_combined() {
        let expect = Config {
            project: Some("demo".to_string()),
            levels: Some([true, true, false, true]),
            lines: Some([true, false, false, true]),
            filters: vec!["foo.rs".to_string(), "bar.rs".to_string()],
        };
        assert_eq!(Ok(expect),
                   parse("project=demo,info:lines,warn,debug:lines,filter=foo.rs,filter=bar.rs"));
    }

    #[test]
    fn test_spec_settings_only() {
        let expect = Config {
            project: Some("demo".to_string()),
            ..Default::default()
        };
        assert_eq!(Ok(expect), parse("project=demo"));
    }

    #[test]
    fn test_spec_json() {
        let expect = Config {
            project: Some("demo".to_string()),
            levels: Some([true, false, false, true]),
            lines: Some([false, false, false, true]),
            filters: vec!["foo.rs".to_string()],
        };
        assert_eq!(Ok(expect), parse(r#"{
                                            "project": "demo",
                                            "levels": ["info", "debug"],
                                            "lines": ["debug"],
                                            "filters": ["foo.rs"]
                                        }"#));

        let expect = Config {
            levels: Some([false; 4]),
            ..Default::default()
        };
        assert_eq!(Ok(expect), parse(r#"{"levels": []}"#));
    }

    #[test]
    fn test_spec_json_invalid() {
        assert_eq!(Err(ParseError::Json(JsonError::Json)), parse("{"));

        assert_eq!(Err(ParseError::Json(JsonError::Root)),
                   parse(r#"{}"#));

        assert_eq!(Err(ParseError::Json(JsonError::Project)),
                   parse(r#"{"project": 42}"#));

        assert_eq!(Err(ParseError::Json(JsonError::Levels)),
                   parse(r#"{"levels": "info"}"#));
        assert_eq!(Err(ParseError::Json(JsonError::Levels)),
                   parse(r#"{"levels": ["trace"]}"#));

        assert_eq!(Err(ParseError::Json(JsonError::Lines)),
                   parse(r#"{"lines": [1]}"#));

        assert_eq!(Err(ParseError::Json(JsonError::Filters)),
                   parse(r#"{"filters": {}}"#));
        assert_eq!(Err(ParseError::Json(JsonError::Filters)),
                   parse(r#"{"filters": [""]}"#));
    }
}
