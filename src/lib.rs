#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![warn(unused)]
#![warn(nonstandard_style)]
#![warn(clippy::pedantic)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::dbg_macro)]
#![forbid(unsafe_code)]
#![warn(clippy::todo)]
#![warn(clippy::unimplemented)]

use std::any::Any;
use std::future::Future;

#[doc(hidden)]
pub use ::async_trait as async_trait_export;
#[doc(hidden)]
pub use ::tokio as tokio_export;
pub use shakespeare_macro::{actor, performance, role};
#[doc(hidden)]
pub use tokio::TokioUnbounded;

mod core;
mod tokio;

#[cfg(test)]
mod test;

pub use core::{ActorHandle, ActorOutcome, ActorShell, ActorSpawn, Channel, Role, RoleReceiver, RoleSender};

use futures::Stream;

#[doc(hidden)]
pub type Role2Payload<R: ?Sized> = <R as Role>::Payload;
#[doc(hidden)]
pub type Role2Receiver<R: ?Sized> = <<R as Role>::Channel as Channel>::Receiver;
#[doc(hidden)]
pub type Role2Sender<R: ?Sized> = <<R as Role>::Channel as Channel>::Sender;
#[doc(hidden)]
pub type Role2SendError<R: ?Sized> = <Role2Sender<R> as RoleSender<Role2Payload<R>>>::Error;

#[doc(hidden)]
pub fn catch_future<T>(fut: T) -> impl Future<Output = Result<T::Output, Box<dyn Any + Send>>>
where
	T: Future,
{
	futures::future::FutureExt::catch_unwind(std::panic::AssertUnwindSafe(fut))
}

/// Subscribes an actor to a [`Stream`], forwarding each item as a message.
///
/// Unlike a method call, this does not keep the actor alive: once the held
/// [`RoleSender`] starts failing (actor dropped), the spawned task exits.
pub fn send_stream_to<R, S>(stream: S, actor: std::sync::Arc<R>)
where
	R: Role + ?Sized,
	S: Stream + Send + 'static,
	R::Payload: From<S::Item>,
	<S as Stream>::Item: Send,
{
	use futures::StreamExt;
	let sender = actor.clone_sender();
	tokio_export::spawn(async move {
		stream
			.for_each(|msg| {
				let sender = sender.clone();
				async move {
					let _ = sender.send(msg.into()).await;
				}
			})
			.await;
	});
}

/// Delivers the output of a future to an actor's mailbox once it resolves.
pub fn send_future_to<R, F>(fut: F, actor: std::sync::Arc<R>)
where
	R: Role + ?Sized,
	F: Future + Send + 'static,
	R::Payload: From<F::Output>,
{
	let sender = actor.clone_sender();
	tokio_export::spawn(async move {
		let payload = fut.await.into();
		let _ = sender.send(payload).await;
	});
}
