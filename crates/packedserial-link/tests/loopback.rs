use packedserial_core::{Codec, Value};
use packedserial_link::{encode_frame, FrameError, LinkError, StreamLink, TypedLink};
use tokio::io::{duplex, AsyncWriteExt};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[tokio::test]
async fn device_stream_written_byte_by_byte_is_reassembled() {
    init_logging();
    let (host, mut device) = duplex(16);
    let codec = Codec::new("string,string".parse().unwrap());
    let mut link = TypedLink::new(StreamLink::new(host, 64), codec.clone());

    let writer = tokio::spawn(async move {
        let mut wire = Vec::new();
        for (a, b) in [("abc", "de"), ("", "x"), ("hello", "world")] {
            let packet = codec.encode(&[Value::from(a), Value::from(b)]).unwrap();
            wire.extend(encode_frame(&packet));
        }
        for byte in wire {
            device.write_all(&[byte]).await.unwrap();
        }
    });

    let mut got = Vec::new();
    for _ in 0..3 {
        got.push(link.recv_values().await.unwrap());
    }
    writer.await.unwrap();

    assert_eq!(
        got,
        vec![
            vec![Value::from("abc"), Value::from("de")],
            vec![Value::from(""), Value::from("x")],
            vec![Value::from("hello"), Value::from("world")],
        ]
    );
    assert!(matches!(link.recv_values().await, Err(LinkError::Closed)));
}

#[tokio::test]
async fn line_noise_is_reported_and_skipped() {
    init_logging();
    let (host, mut device) = duplex(64);
    let mut link = TypedLink::new(
        StreamLink::new(host, 64),
        Codec::new("int32".parse().unwrap()),
    );

    // A frame whose code byte overruns it, then a good packet.
    device.write_all(&[0x09, 0x01, 0x00]).await.unwrap();
    device
        .write_all(&encode_frame(&[0xFF, 0xFF, 0xFF, 0xFF]))
        .await
        .unwrap();

    assert!(matches!(
        link.recv_values().await,
        Err(LinkError::Frame(FrameError::Malformed))
    ));
    assert_eq!(link.recv_values().await.unwrap(), vec![Value::Int(-1)]);
}
