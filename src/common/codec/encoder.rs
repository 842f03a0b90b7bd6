pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use tracing::debug;

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use crate::common::bitstream::BitStream;
    use crate::common::codec::{Mode, Segment};
    use crate::common::metadata::{ECLevel, Version};
    use crate::error::{EncodingError, EncodingResult};

    /// Packs `data` into the data codewords of the smallest version, no
    /// smaller than `min_ver`, that holds it at `ecl`.
    pub fn encode(data: &[u8], ecl: ECLevel, min_ver: Version) -> EncodingResult<(BitStream, Version)> {
        if data.is_empty() {
            return Err(EncodingError::EmptyData);
        }

        let mode = Mode::select(data);
        let (ver, seg) = find_optimal_version(data, mode, ecl, min_ver)?;
        debug!("Selected {mode:?} mode, version {}", *ver);

        let mut bs = BitStream::new(ver.data_bit_capacity(ecl));
        push_segment(seg, &mut bs);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        Ok((bs, ver))
    }

    fn find_optimal_version(
        data: &[u8],
        mode: Mode,
        ecl: ECLevel,
        min_ver: Version,
    ) -> EncodingResult<(Version, Segment<'_>)> {
        for ver in min_ver.upwards() {
            let seg = Segment::new(mode, ver, data);
            if seg.bit_len() <= ver.data_bit_capacity(ecl) {
                return Ok((ver, seg));
            }
        }

        let capacity = mode.max_chars(Version::MAX, Version::MAX.data_bit_capacity(ecl));
        Err(EncodingError::DataTooLong { len: data.len(), ec_level: ecl, capacity })
    }

    #[cfg(test)]
    mod encode_tests {
        use test_case::test_case;

        use super::{encode, find_optimal_version, ECLevel, EncodingError, Mode, Version};

        #[test_case("HELLO WORLD".to_string(), ECLevel::M, 1)]
        #[test_case("a".repeat(14), ECLevel::M, 1)]
        #[test_case("a".repeat(15), ECLevel::M, 2)]
        #[test_case("1".repeat(41), ECLevel::L, 1)]
        #[test_case("1".repeat(42), ECLevel::L, 2)]
        #[test_case("a".repeat(230), ECLevel::L, 9)]
        #[test_case("a".repeat(231), ECLevel::L, 10)]
        #[test_case("a".repeat(2953), ECLevel::L, 40)]
        #[test_case("a".repeat(1273), ECLevel::H, 40)]
        fn test_find_optimal_version(data: String, ecl: ECLevel, exp_ver: u8) {
            let mode = Mode::select(data.as_bytes());
            let (ver, _) = find_optimal_version(data.as_bytes(), mode, ecl, Version::MIN).unwrap();
            assert_eq!(*ver, exp_ver);
        }

        #[test]
        fn test_min_version_is_respected() {
            let min_ver = Version::new(5).unwrap();
            let (_, ver) = encode(b"hi", ECLevel::L, min_ver).unwrap();
            assert_eq!(ver, min_ver);
        }

        #[test_case(2954, ECLevel::L, 2953)]
        #[test_case(2332, ECLevel::M, 2331)]
        #[test_case(1664, ECLevel::Q, 1663)]
        #[test_case(1274, ECLevel::H, 1273)]
        fn test_data_too_long(len: usize, ecl: ECLevel, exp_capacity: usize) {
            let data = "a".repeat(len);
            match encode(data.as_bytes(), ecl, Version::MIN) {
                Err(EncodingError::DataTooLong { len: l, ec_level, capacity }) => {
                    assert_eq!(l, len);
                    assert_eq!(ec_level, ecl);
                    assert_eq!(capacity, exp_capacity);
                }
                other => panic!("Expected DataTooLong, got {other:?}"),
            }
        }

        #[test]
        fn test_data_too_long_counts_digits() {
            let data = "1".repeat(7090);
            let err = encode(data.as_bytes(), ECLevel::L, Version::MIN).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Data too long: 7090 characters exceeds the capacity of 7089 characters at error correction level L"
            );
        }

        #[test]
        fn test_empty_data() {
            assert!(matches!(encode(b"", ECLevel::L, Version::MIN), Err(EncodingError::EmptyData)));
        }

        // Worked example from the symbology standard: "HELLO WORLD" at 1-M
        #[test]
        fn test_encode_hello_world() {
            let (bs, ver) = encode(b"HELLO WORLD", ECLevel::M, Version::MIN).unwrap();
            assert_eq!(*ver, 1);
            assert_eq!(bs.len(), 128);
            assert_eq!(
                bs.data(),
                [
                    0x20, 0x5B, 0x0B, 0x78, 0xD1, 0x72, 0xDC, 0x4D, 0x43, 0x40, 0xEC, 0x11, 0xEC,
                    0x11, 0xEC, 0x11
                ]
            );
        }

        #[test]
        fn test_encode_fills_capacity() {
            let ecl = ECLevel::Q;
            let (bs, ver) = encode(b"01234567", ecl, Version::MIN).unwrap();
            assert_eq!(bs.len(), ver.data_bit_capacity(ecl));
        }
    }
}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bitstream::BitStream;
    use crate::common::codec::{Mode, Segment, PADDING_CODEWORDS};

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        let (chunk_chars, _) = seg.mode.chunk_shape();
        for chunk in seg.data.chunks(chunk_chars) {
            let len = seg.mode.encoded_len(chunk.len());
            out.push_bits(seg.mode.encode_chunk(chunk), len);
        }
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, seg.mode_bits);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {offset}");

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_header, push_padding_bits, push_padding_codewords, push_segment, push_terminator,
        };
        use crate::common::bitstream::BitStream;
        use crate::common::codec::{Mode, Segment, PADDING_CODEWORDS};
        use crate::common::metadata::{ECLevel, Version};

        fn v1_stream() -> BitStream {
            BitStream::new(Version::MIN.data_bit_capacity(ECLevel::L))
        }

        #[test]
        fn test_push_header_v1() {
            let ver = Version::MIN;
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111100],
                vec![0b00101111, 0b11111000],
                vec![0b01001111, 0b11110000],
            ];
            let dummy_vec = vec![0; 1023];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let dummy_idx = [1023, 511, 255];
            for ((mode, di), exp_vec) in modes.iter().zip(dummy_idx.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new(64);
                let seg = Segment::new(*mode, ver, &dummy_vec[..*di]);
                push_header(&seg, &mut bs);
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_numeric_data() {
            let mut bs = BitStream::new(64);
            push_segment(Segment::new(Mode::Numeric, Version::MIN, b"01234567"), &mut bs);
            // 0001 | 0000001000 | 0000001100 0101011001 1000011
            assert_eq!(bs.len(), 4 + 10 + 27);
            assert_eq!(&bs.data()[..2], [0b0001_0000, 0b0010_0000]);
        }

        #[test]
        fn test_push_alphanumeric_data() {
            let mut bs = BitStream::new(64);
            push_segment(Segment::new(Mode::Alphanumeric, Version::MIN, b"AC-42"), &mut bs);
            assert_eq!(bs.len(), 4 + 9 + 28);
            // Header 0010 000000101, then the data of the worked example
            assert_eq!(
                bs.data(),
                [0b0010_0000, 0b0010_1001, 0b1100_1110, 0b1110_0111, 0b0010_0001, 0b0000_0000]
            );
        }

        #[test]
        fn test_push_byte_data() {
            let mut bs = BitStream::new(64);
            push_segment(Segment::new(Mode::Byte, Version::MIN, b"a"), &mut bs);
            assert_eq!(bs.data(), [0b0100_0000, 0b0001_0110, 0b0001_0000]);
        }

        #[test]
        fn test_push_terminator() {
            let mut bs = v1_stream();
            let capacity = bs.capacity() >> 3;
            bs.push_bits(0b1u8, 1);
            push_terminator(&mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len() & 7, 5);
            push_padding_bits(&mut bs);
            for _ in 0..capacity - 1 {
                bs.push_bits(0b11111111u8, 8);
            }
            push_terminator(&mut bs);
            assert_eq!(bs.len(), bs.capacity());
        }

        #[test]
        fn test_push_padding_bits() {
            let mut bs = v1_stream();
            bs.push_bits(0b1u8, 1);
            push_padding_bits(&mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len() & 7, 0);
        }

        #[test]
        fn test_push_padding_codewords() {
            let mut bs = v1_stream();
            bs.push_bits(0b1u8, 1);
            push_padding_bits(&mut bs);
            push_padding_codewords(&mut bs);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bs.data(), output);
        }
    }
}
