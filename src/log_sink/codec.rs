use crate::report::ReportLine;

use bytes::BufMut;
use bytes::BytesMut;

use std::io;

use tokio_util::codec::Encoder;

pub const NEWLINE: &[u8] = b"\r\n";

/// Frames report lines for the log file, one per CRLF-terminated line.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ReportCodec {}

impl<'a> Encoder<&'a ReportLine> for ReportCodec {
    type Error = io::Error;

    fn encode(&mut self, line: &'a ReportLine, buf: &mut BytesMut) -> Result<(), io::Error> {
        buf.reserve(line.len() + NEWLINE.len());
        buf.put(line.as_str().as_bytes());
        buf.put(NEWLINE);

        Ok(())
    }
}
