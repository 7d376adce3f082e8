#![cfg(unix)]

use std::io::Write;
use std::os::unix::net::UnixStream;
use std::thread;

use nativemsg::{ByteOrder, Channel, FrameConfig, FrameError, InvalidFrame, ReadMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Request {
    id: u32,
    #[serde(rename = "Text")]
    text: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Reply {
    id: u32,
    echoed: String,
}

type SocketChannel = Channel<UnixStream, UnixStream>;

fn channel_pair(order: ByteOrder) -> (SocketChannel, SocketChannel) {
    let (left, right) = UnixStream::pair().unwrap();
    let left_w = left.try_clone().unwrap();
    let right_w = right.try_clone().unwrap();
    (
        Channel::new(left, left_w, order),
        Channel::new(right, right_w, order),
    )
}

#[test]
fn send_receive_struct_over_socket_pair() {
    let (mut browser, mut host) = channel_pair(ByteOrder::Little);

    let request = Request {
        id: 1,
        text: "native messaging host".to_string(),
    };
    browser.send(&request).unwrap();

    let received: Request = host.recv().unwrap();
    assert_eq!(received.text, "native messaging host");
}

#[test]
fn echo_host_thread_round_trips() {
    for order in [ByteOrder::Big, ByteOrder::Little, ByteOrder::Native] {
        let (mut browser, host) = channel_pair(order);

        let host_thread = thread::spawn(move || {
            let mut host = host;
            let mut served = 0;
            loop {
                let req: Request = match host.recv() {
                    Ok(req) => req,
                    Err(err) if err.is_closed() => break,
                    Err(err) => panic!("host receive failed: {err}"),
                };
                host.send(&Reply {
                    id: req.id,
                    echoed: req.text,
                })
                .unwrap();
                served += 1;
            }
            served
        });

        for id in 0..32u32 {
            browser
                .send(&Request {
                    id,
                    text: format!("msg-{id}"),
                })
                .unwrap();
            let reply: Reply = browser.recv().unwrap();
            assert_eq!(
                reply,
                Reply {
                    id,
                    echoed: format!("msg-{id}")
                }
            );
        }

        let (reader, writer) = browser.into_split();
        reader
            .into_inner()
            .shutdown(std::net::Shutdown::Both)
            .unwrap();
        drop(writer);

        assert_eq!(host_thread.join().unwrap(), 32);
    }
}

#[test]
fn split_halves_run_on_separate_threads() {
    let (browser, host) = channel_pair(ByteOrder::Native);
    let (mut browser_rx, mut browser_tx) = browser.into_split();
    let (mut host_rx, mut host_tx) = host.into_split();

    let writer = thread::spawn(move || {
        for i in 0..64u32 {
            browser_tx.send(&i).unwrap();
        }
    });
    let relay = thread::spawn(move || {
        for _ in 0..64 {
            let n: u32 = host_rx.recv().unwrap();
            host_tx.send(&(n * 2)).unwrap();
        }
    });

    for i in 0..64u32 {
        let doubled: u32 = browser_rx.recv().unwrap();
        assert_eq!(doubled, i * 2);
    }

    writer.join().unwrap();
    relay.join().unwrap();
}

#[test]
fn chunked_delivery_needs_exact_mode() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    let payload = br#"{"id":9,"Text":"chunked"}"#;
    let header = ByteOrder::Big.encode_len(payload.len() as u32);

    let feeder = thread::spawn(move || {
        for chunk in header.iter().chain(payload.iter()) {
            tx.write_all(&[*chunk]).unwrap();
            thread::sleep(std::time::Duration::from_millis(1));
        }
    });

    let mut host = Channel::receive_only(rx, ByteOrder::Big);
    let req: Request = host.recv().unwrap();
    assert_eq!(req.id, 9);
    assert_eq!(req.text, "chunked");

    feeder.join().unwrap();
}

#[test]
fn single_mode_reports_short_read_on_chunked_delivery() {
    let (mut tx, rx) = UnixStream::pair().unwrap();

    // Two bytes of header, then a pause long enough for the reader's single
    // read call to return with only those two.
    tx.write_all(&[0x00, 0x00]).unwrap();
    let feeder = thread::spawn(move || {
        thread::sleep(std::time::Duration::from_millis(50));
        let _ = tx.write_all(&[0x00, 0x02, b'{', b'}']);
    });

    let cfg = FrameConfig {
        byte_order: ByteOrder::Big,
        read_mode: ReadMode::Single,
        ..FrameConfig::default()
    };
    let mut host = Channel::with_config(rx, std::io::sink(), cfg);
    let err = host.read_frame().unwrap_err();
    assert!(matches!(
        err,
        FrameError::ShortRead {
            expected: 4,
            actual: 2
        }
    ));

    feeder.join().unwrap();
}

#[test]
fn peer_closing_mid_header_is_short_read() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    tx.write_all(&[0x10, 0x00, 0x00]).unwrap();
    drop(tx);

    let mut host = Channel::receive_only(rx, ByteOrder::Little);
    let err = host.read_frame().unwrap_err();
    assert!(matches!(
        err,
        FrameError::ShortRead {
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn peer_closing_between_frames_is_missing_header() {
    let (tx, rx) = UnixStream::pair().unwrap();
    drop(tx);

    let mut host = Channel::receive_only(rx, ByteOrder::Little);
    let err = host.read_frame().unwrap_err();
    assert!(matches!(
        err,
        FrameError::InvalidFrame(InvalidFrame::MissingHeader)
    ));
    assert!(err.is_closed());
}

#[test]
fn writing_to_closed_peer_is_io_error() {
    let (tx, rx) = UnixStream::pair().unwrap();
    drop(rx);

    let mut channel = Channel::send_only(tx, ByteOrder::Native);
    let err = channel.write_frame(b"{\"late\":true}").unwrap_err();
    assert!(matches!(err, FrameError::Io(_)));
}
