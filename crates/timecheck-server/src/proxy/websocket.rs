use std::borrow::Cow;

use futures::{SinkExt, StreamExt};
use reqwest::Url;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{self, Message as UpstreamMessage};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use warp::ws::{Message, WebSocket};

pub(super) type Upstream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub(super) async fn connect(url: &Url) -> tungstenite::Result<Upstream> {
    let (upstream, _) = tokio_tungstenite::connect_async(url.as_str()).await?;

    Ok(upstream)
}

/// Converts a message received from the browser. Ping and pong are answered by each side on its
/// own, so they are not forwarded.
fn to_upstream(msg: Message) -> Option<UpstreamMessage> {
    if let Some((code, reason)) = msg.close_frame() {
        return Some(UpstreamMessage::Close(Some(CloseFrame {
            code: CloseCode::from(code),
            reason: Cow::Owned(reason.to_owned()),
        })));
    }

    if msg.is_close() {
        return Some(UpstreamMessage::Close(None));
    }

    if let Ok(m) = msg.to_str() {
        return Some(UpstreamMessage::Text(m.to_owned()));
    }

    if msg.is_binary() {
        return Some(UpstreamMessage::Binary(msg.into_bytes()));
    }

    None
}

/// Converts a message received from the upstream.
fn to_client(msg: UpstreamMessage) -> Option<Message> {
    match msg {
        UpstreamMessage::Text(m) => Some(Message::text(m)),
        UpstreamMessage::Binary(m) => Some(Message::binary(m)),
        UpstreamMessage::Close(Some(frame)) => Some(Message::close_with(
            u16::from(frame.code),
            frame.reason.into_owned(),
        )),
        UpstreamMessage::Close(None) => Some(Message::close()),
        UpstreamMessage::Ping(_) | UpstreamMessage::Pong(_) | UpstreamMessage::Frame(_) => None,
    }
}

/// Pipes messages both ways until either side closes or fails.
pub(super) async fn bridge(client: WebSocket, upstream: Upstream) {
    let (mut client_tx, mut client_rx) = client.split();
    let (mut upstream_tx, mut upstream_rx) = upstream.split();

    let client_to_upstream = async {
        while let Some(Ok(msg)) = client_rx.next().await {
            let closing = msg.is_close();

            if let Some(m) = to_upstream(msg) {
                if upstream_tx.send(m).await.is_err() {
                    break;
                }
            }

            if closing {
                break;
            }
        }
    };

    let upstream_to_client = async {
        while let Some(Ok(msg)) = upstream_rx.next().await {
            let closing = msg.is_close();

            if let Some(m) = to_client(msg) {
                if client_tx.send(m).await.is_err() {
                    break;
                }
            }

            if closing {
                break;
            }
        }
    };

    tokio::select! {
        _ = client_to_upstream => {},
        _ = upstream_to_client => {},
    }

    let _ = upstream_tx.close().await;
    let _ = client_tx.close().await;

    tracing::debug!("websocket bridge closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_upstream() {
        assert_eq!(
            to_upstream(Message::text("reload")),
            Some(UpstreamMessage::Text("reload".to_owned()))
        );
    }

    #[test]
    fn test_binary_to_upstream() {
        assert_eq!(
            to_upstream(Message::binary(vec![1, 2, 3])),
            Some(UpstreamMessage::Binary(vec![1, 2, 3]))
        );
    }

    #[test]
    fn test_close_to_upstream() {
        let msg = to_upstream(Message::close_with(1000u16, "bye"));

        let frame = match msg {
            Some(UpstreamMessage::Close(Some(m))) => m,
            other => panic!("expected a close frame, got {:?}", other),
        };

        assert_eq!(u16::from(frame.code), 1000);
        assert_eq!(frame.reason, "bye");
    }

    #[test]
    fn test_ping_is_not_forwarded() {
        assert_eq!(to_upstream(Message::ping(vec![1])), None);
        assert_eq!(to_client(UpstreamMessage::Ping(vec![1])), None);
        assert_eq!(to_client(UpstreamMessage::Pong(vec![1])), None);
    }

    #[test]
    fn test_upstream_to_client() {
        assert_eq!(
            to_client(UpstreamMessage::Text("reload".to_owned())),
            Some(Message::text("reload"))
        );
        assert_eq!(
            to_client(UpstreamMessage::Binary(vec![4, 5])),
            Some(Message::binary(vec![4, 5]))
        );

        let closed = to_client(UpstreamMessage::Close(None)).expect("close is forwarded");
        assert!(closed.is_close());
    }
}
