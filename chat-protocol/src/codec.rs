use std::marker::PhantomData;

use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

/// Failure modes for a framed JSON message, whether reading or writing.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
	#[error("framing: {0}")]
	Framing(#[from] LinesCodecError),
	#[error("malformed message: {0}")]
	Json(#[from] serde_json::Error),
}

/// Frames newline-delimited JSON over a byte stream.
///
/// Wraps [`LinesCodec`] rather than reimplementing length-prefixing or
/// delimiter-scanning: one [`ClientMessage`](crate::ClientMessage) or
/// [`ServerMessage`](crate::ServerMessage) per line.
///
/// Parameterized by the type it decodes into (`In`), since [`Decoder::Item`]
/// is an associated type and a single concrete codec can't decode into two
/// different types at once. [`Encoder`] stays generic over whatever it's
/// asked to serialize, independent of `In`, so the same type serves a
/// connection's read half as `MessageCodec<ClientMessage>` (the server's
/// decode direction) and its write half as `MessageCodec<ServerMessage>`
/// (only used for its `Encoder` impl there).
pub struct MessageCodec<In> {
	lines:    LinesCodec,
	_decodes: PhantomData<fn() -> In>,
}

impl<In> std::fmt::Debug for MessageCodec<In> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MessageCodec").finish_non_exhaustive()
	}
}

impl<In> Default for MessageCodec<In> {
	fn default() -> Self {
		MessageCodec {
			lines:    LinesCodec::new(),
			_decodes: PhantomData,
		}
	}
}

impl<In> MessageCodec<In> {
	#[must_use]
	pub fn new() -> Self {
		MessageCodec::default()
	}
}

impl<In: DeserializeOwned> Decoder for MessageCodec<In> {
	type Item = In;
	type Error = CodecError;

	fn decode(&mut self, src: &mut BytesMut) -> Result<Option<In>, CodecError> {
		let Some(line) = self.lines.decode(src)? else {
			return Ok(None);
		};
		Ok(Some(serde_json::from_str(&line)?))
	}
}

impl<In, Out: Serialize> Encoder<Out> for MessageCodec<In> {
	type Error = CodecError;

	fn encode(&mut self, item: Out, dst: &mut BytesMut) -> Result<(), CodecError> {
		let line = serde_json::to_string(&item)?;
		self.lines.encode(line, dst).map_err(CodecError::from)
	}
}

#[cfg(test)]
mod tests {
	use tokio_util::codec::{Decoder, Encoder};

	use super::MessageCodec;
	use crate::{ClientMessage, ServerMessage};

	#[test]
	fn round_trips_a_client_message_through_one_codec_instance() {
		let mut codec = MessageCodec::<ClientMessage>::new();
		let mut buf = bytes::BytesMut::new();
		let msg = ClientMessage::LogIn {
			user: "Alice".to_owned(),
		};
		Encoder::<ClientMessage>::encode(&mut codec, msg.clone(), &mut buf).unwrap();

		let decoded: Option<ClientMessage> = codec.decode(&mut buf).unwrap();
		assert_eq!(decoded, Some(msg));
	}

	#[test]
	fn decode_returns_none_on_a_partial_frame() {
		let mut codec = MessageCodec::<ClientMessage>::new();
		let mut buf = bytes::BytesMut::from(&b"{\"kind\":\"list\""[..]);
		let decoded: Option<ClientMessage> = codec.decode(&mut buf).unwrap();
		assert_eq!(decoded, None);
	}

	#[test]
	fn rejects_malformed_json_as_a_codec_error() {
		let mut codec = MessageCodec::<ClientMessage>::new();
		let mut buf = bytes::BytesMut::from(&b"not json\n"[..]);
		let result: Result<Option<ClientMessage>, _> = codec.decode(&mut buf);
		assert!(matches!(result, Err(super::CodecError::Json(_))));
	}

	#[test]
	fn encodes_a_server_message() {
		let mut codec = MessageCodec::<ServerMessage>::new();
		let mut buf = bytes::BytesMut::new();
		let msg = ServerMessage::ListReply {
			list: "[Alice]\n".to_owned(),
		};
		Encoder::<ServerMessage>::encode(&mut codec, msg, &mut buf).unwrap();
		assert!(buf.ends_with(b"\n"));
	}
}
