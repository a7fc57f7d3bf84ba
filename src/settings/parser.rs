use crate::settings::OptimizationMode;
use crate::settings::QualityOfService;
use crate::settings::RequestType;
use crate::settings::ServerDescriptor;
use crate::settings::Settings;
use crate::settings::SettingsError;

use nom::bytes::complete::tag;
use nom::bytes::complete::take_while;
use nom::bytes::complete::take_while1;
use nom::character::complete::space0;
use nom::combinator::map;
use nom::error::context;
use nom::error::ContextError;
use nom::error::ParseError;
use nom::error::VerboseError;
use nom::sequence::delimited;
use nom::sequence::separated_pair;
use nom::sequence::terminated;
use nom::IResult;

use std::convert::TryFrom;
use std::net::Ipv4Addr;
use std::str::FromStr;

const OPT: &str = "OPT";
const QOS: &str = "QOS";
const SVRTYPE: &str = "SVRTYPE";
const SVRIP: &str = "SVRIP";
const SVRPORT: &str = "SVRPORT";
const REQTYPE: &str = "REQTYPE";

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn key<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    context("key", delimited(space0, take_while1(is_key_char), space0))(input)
}

fn value<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    context(
        "value",
        map(
            terminated(take_while(|c: char| c != ';' && c != '\r' && c != '\n'), tag(";")),
            |v: &str| v.trim(),
        ),
    )(input)
}

pub(crate) fn directive<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (&'a str, &'a str), E> {
    separated_pair(key, tag("="), value)(input)
}

/// All `KEY=value;` directives in `source`, in document order.  Lines that are not directives are
/// skipped.
pub fn directives(source: &str) -> Vec<(&str, &str)> {
    source
        .lines()
        .filter_map(|line| match directive::<VerboseError<&str>>(line) {
            Ok((_, d)) => Some(d),
            Err(_) => None,
        })
        .collect()
}

fn lookup<'a>(directives: &[(&'a str, &'a str)], name: &str) -> Option<&'a str> {
    directives
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| *v)
}

fn number<T: FromStr>(name: &str, value: &str) -> Result<T, SettingsError> {
    value
        .parse()
        .map_err(|_| SettingsError::InvalidFormat(format!("{} value {:?} is not valid", name, value)))
}

/// Apply the directives in `source` on top of `defaults`.
///
/// A directive that is missing or unrecognized leaves the default in place.  The first occurrence
/// of a directive wins.
pub fn parse_settings(source: &str, defaults: Settings) -> Result<Settings, SettingsError> {
    let found = directives(source);
    let mut settings = defaults;

    if let Some(v) = lookup(&found, OPT) {
        settings.optimization = OptimizationMode::try_from(number::<u32>(OPT, v)?)?;
    }

    if let Some(v) = lookup(&found, QOS) {
        settings.qos = QualityOfService(number(QOS, v)?);
    }

    if let Some(v) = lookup(&found, SVRTYPE) {
        settings.server = match number::<u32>(SVRTYPE, v)? {
            ServerDescriptor::DEFAULT_CODE => ServerDescriptor::Default,
            ServerDescriptor::IP_CODE => ip_server(&found, settings.server)?,
            c => {
                return Err(SettingsError::InvalidFormat(format!(
                    "unknown server type {}",
                    c
                )))
            }
        };
    }

    if let Some(v) = lookup(&found, REQTYPE) {
        settings.request_type = RequestType::try_from(number::<u32>(REQTYPE, v)?)?;
    }

    Ok(settings)
}

fn ip_server(
    found: &[(&str, &str)],
    prior: ServerDescriptor,
) -> Result<ServerDescriptor, SettingsError> {
    let (mut address, mut port) = match prior {
        ServerDescriptor::Ip { address, port } => (address, port),
        ServerDescriptor::Default => (Ipv4Addr::UNSPECIFIED, 0),
    };

    if let Some(v) = lookup(found, SVRIP) {
        address = Ipv4Addr::from_str(v).map_err(|_| SettingsError::InvalidAddress(v.to_string()))?;
    }

    if let Some(v) = lookup(found, SVRPORT) {
        port = number(SVRPORT, v)?;
    }

    Ok(ServerDescriptor::Ip { address, port })
}

/// Render `settings` as a settings document.
pub fn to_document(settings: &Settings) -> String {
    let mut document = String::new();

    document += &format!("{}={};\r\n", OPT, settings.optimization.code());
    document += &format!("{}={};\r\n", QOS, settings.qos.0);
    document += &format!("{}={};\r\n", SVRTYPE, settings.server.code());

    if let ServerDescriptor::Ip { address, port } = settings.server {
        document += &format!("{}={};\r\n", SVRIP, address);
        document += &format!("{}={};\r\n", SVRPORT, port);
    }

    document += &format!("{}={};\r\n", REQTYPE, settings.request_type.code());

    document
}
