use crate::{
    metadata::{
        signatures::{SignatureMethod, SignatureParameter, TypeSignature, CALLING_CONVENTION, ELEMENT_TYPE},
        token::Token,
    },
    Result,
};

/// Append a compressed unsigned integer (II.23.2).
///
/// # Errors
/// Returns an error for values above `0x1FFF_FFFF`, which cannot be compressed.
pub fn write_compressed_uint(value: u32, buffer: &mut Vec<u8>) -> Result<()> {
    if value < 0x80 {
        buffer.push(value.to_le_bytes()[0]);
    } else if value < 0x4000 {
        let [_, _, high, low] = value.to_be_bytes();
        buffer.extend_from_slice(&[0x80 | high, low]);
    } else if value < 0x2000_0000 {
        let [b0, b1, b2, b3] = value.to_be_bytes();
        buffer.extend_from_slice(&[0xC0 | b0, b1, b2, b3]);
    } else {
        return Err(malformed_error!(
            "Value too large for compressed encoding - {}",
            value
        ));
    }

    Ok(())
}

fn encode_type_def_or_ref(token: Token, buffer: &mut Vec<u8>) -> Result<()> {
    let rid = token.row();
    let coded = match token.table() {
        0x02 => rid << 2,
        0x01 => (rid << 2) | 1,
        0x1B => (rid << 2) | 2,
        table => {
            return Err(malformed_error!(
                "Invalid token table 0x{:02X} for TypeDefOrRef encoding",
                table
            ))
        }
    };

    write_compressed_uint(coded, buffer)
}

/// Append the encoding of one signature element.
///
/// # Errors
/// Returns an error for elements that cannot be encoded (tokens of the wrong table,
/// placeholders, out of range values).
pub fn encode_type_signature(signature: &TypeSignature, buffer: &mut Vec<u8>) -> Result<()> {
    match signature {
        TypeSignature::Unknown => {
            return Err(malformed_error!("Cannot encode an unknown type signature"))
        }
        TypeSignature::Void => buffer.push(ELEMENT_TYPE::VOID),
        TypeSignature::Boolean => buffer.push(ELEMENT_TYPE::BOOLEAN),
        TypeSignature::Char => buffer.push(ELEMENT_TYPE::CHAR),
        TypeSignature::I1 => buffer.push(ELEMENT_TYPE::I1),
        TypeSignature::U1 => buffer.push(ELEMENT_TYPE::U1),
        TypeSignature::I2 => buffer.push(ELEMENT_TYPE::I2),
        TypeSignature::U2 => buffer.push(ELEMENT_TYPE::U2),
        TypeSignature::I4 => buffer.push(ELEMENT_TYPE::I4),
        TypeSignature::U4 => buffer.push(ELEMENT_TYPE::U4),
        TypeSignature::I8 => buffer.push(ELEMENT_TYPE::I8),
        TypeSignature::U8 => buffer.push(ELEMENT_TYPE::U8),
        TypeSignature::R4 => buffer.push(ELEMENT_TYPE::R4),
        TypeSignature::R8 => buffer.push(ELEMENT_TYPE::R8),
        TypeSignature::String => buffer.push(ELEMENT_TYPE::STRING),
        TypeSignature::TypedByRef => buffer.push(ELEMENT_TYPE::TYPEDBYREF),
        TypeSignature::I => buffer.push(ELEMENT_TYPE::I),
        TypeSignature::U => buffer.push(ELEMENT_TYPE::U),
        TypeSignature::Object => buffer.push(ELEMENT_TYPE::OBJECT),
        TypeSignature::Ptr(base) => {
            buffer.push(ELEMENT_TYPE::PTR);
            encode_type_signature(base, buffer)?;
        }
        TypeSignature::ByRef(base) => {
            buffer.push(ELEMENT_TYPE::BYREF);
            encode_type_signature(base, buffer)?;
        }
        TypeSignature::Pinned(base) => {
            buffer.push(ELEMENT_TYPE::PINNED);
            encode_type_signature(base, buffer)?;
        }
        TypeSignature::SzArray(base) => {
            buffer.push(ELEMENT_TYPE::SZARRAY);
            encode_type_signature(base, buffer)?;
        }
        TypeSignature::ValueType(token) => {
            buffer.push(ELEMENT_TYPE::VALUETYPE);
            encode_type_def_or_ref(*token, buffer)?;
        }
        TypeSignature::Class(token) => {
            buffer.push(ELEMENT_TYPE::CLASS);
            encode_type_def_or_ref(*token, buffer)?;
        }
        TypeSignature::GenericParamType(index) => {
            buffer.push(ELEMENT_TYPE::VAR);
            write_compressed_uint(*index, buffer)?;
        }
        TypeSignature::GenericParamMethod(index) => {
            buffer.push(ELEMENT_TYPE::MVAR);
            write_compressed_uint(*index, buffer)?;
        }
        TypeSignature::GenericInst(base, args) => {
            buffer.push(ELEMENT_TYPE::GENERICINST);
            encode_type_signature(base, buffer)?;
            write_compressed_uint(count(args.len())?, buffer)?;
            for arg in args {
                encode_type_signature(arg, buffer)?;
            }
        }
        TypeSignature::Array(array) => {
            buffer.push(ELEMENT_TYPE::ARRAY);
            encode_type_signature(&array.base, buffer)?;
            write_compressed_uint(array.rank, buffer)?;

            let sizes: Vec<u32> = array.dimensions.iter().filter_map(|d| d.size).collect();
            write_compressed_uint(count(sizes.len())?, buffer)?;
            for size in sizes {
                write_compressed_uint(size, buffer)?;
            }

            let bounds: Vec<u32> = array
                .dimensions
                .iter()
                .filter_map(|d| d.lower_bound)
                .collect();
            write_compressed_uint(count(bounds.len())?, buffer)?;
            for bound in bounds {
                write_compressed_uint(bound, buffer)?;
            }
        }
        TypeSignature::FnPtr(method) => {
            buffer.push(ELEMENT_TYPE::FNPTR);
            buffer.extend(encode_method_signature(method)?);
        }
    }

    Ok(())
}

fn count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| malformed_error!("Too many signature entries: {}", len))
}

fn encode_parameter(parameter: &SignatureParameter, buffer: &mut Vec<u8>) -> Result<()> {
    for modifier in &parameter.modifiers {
        buffer.push(ELEMENT_TYPE::CMOD_OPT);
        encode_type_def_or_ref(*modifier, buffer)?;
    }

    if parameter.by_ref {
        buffer.push(ELEMENT_TYPE::BYREF);
    }

    encode_type_signature(&parameter.base, buffer)
}

/// Encode a method signature blob.
///
/// # Errors
/// Returns an error if any element cannot be encoded.
pub fn encode_method_signature(signature: &SignatureMethod) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();

    let mut calling_convention = if signature.vararg {
        CALLING_CONVENTION::VARARG
    } else {
        CALLING_CONVENTION::DEFAULT
    };

    if signature.has_this {
        calling_convention |= CALLING_CONVENTION::HASTHIS;
    }

    if signature.explicit_this {
        calling_convention |= CALLING_CONVENTION::EXPLICITTHIS;
    }

    if signature.param_count_generic > 0 {
        calling_convention |= CALLING_CONVENTION::GENERIC;
    }

    buffer.push(calling_convention);

    if signature.param_count_generic > 0 {
        write_compressed_uint(signature.param_count_generic, &mut buffer)?;
    }

    write_compressed_uint(count(signature.params.len())?, &mut buffer)?;

    encode_parameter(&signature.return_type, &mut buffer)?;
    for param in &signature.params {
        encode_parameter(param, &mut buffer)?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{file::parser::Parser, metadata::signatures::SignatureParser};

    #[test]
    fn compressed_uint() {
        for (value, expected) in [
            (0x03_u32, vec![0x03]),
            (0x7F, vec![0x7F]),
            (0x80, vec![0x80, 0x80]),
            (0x2E57, vec![0xAE, 0x57]),
            (0x4000, vec![0xC0, 0x00, 0x40, 0x00]),
            (0x1FFF_FFFF, vec![0xDF, 0xFF, 0xFF, 0xFF]),
        ] {
            let mut buffer = Vec::new();
            write_compressed_uint(value, &mut buffer).unwrap();
            assert_eq!(buffer, expected);
            assert_eq!(Parser::new(&buffer).read_compressed_uint().unwrap(), value);
        }

        assert!(write_compressed_uint(0x2000_0000, &mut Vec::new()).is_err());
    }

    #[test]
    fn method_signature_matches_parser() {
        let signature = SignatureMethod {
            has_this: true,
            param_count: 2,
            return_type: SignatureParameter::new(TypeSignature::Class(Token::new(0x0100_0003))),
            params: vec![
                SignatureParameter::new(TypeSignature::U4),
                SignatureParameter {
                    modifiers: vec![],
                    by_ref: true,
                    base: TypeSignature::SzArray(Box::new(TypeSignature::U1)),
                },
            ],
            ..Default::default()
        };

        let encoded = encode_method_signature(&signature).unwrap();
        assert_eq!(encoded, vec![0x20, 0x02, 0x12, 0x0D, 0x09, 0x10, 0x1D, 0x05]);

        let decoded = SignatureParser::new(&encoded)
            .parse_method_signature()
            .unwrap();
        assert_eq!(decoded, signature);
    }

    #[test]
    fn invalid_tokens() {
        let mut buffer = Vec::new();
        assert!(
            encode_type_signature(&TypeSignature::Class(Token::new(0x0600_0001)), &mut buffer)
                .is_err()
        );
        assert!(encode_type_signature(&TypeSignature::Unknown, &mut buffer).is_err());
    }
}
