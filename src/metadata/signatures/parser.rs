use crate::{
    file::parser::Parser,
    metadata::{
        signatures::{
            ArrayDimensions, SignatureArray, SignatureMethod, SignatureParameter, TypeSignature,
            CALLING_CONVENTION, ELEMENT_TYPE,
        },
        token::Token,
    },
    Error::RecursionLimit,
    Result,
};

const MAX_RECURSION_DEPTH: usize = 50;

/// Decoder for signature blobs (II.23.2)
pub struct SignatureParser<'a> {
    parser: Parser<'a>,
    depth: usize,
}

impl<'a> SignatureParser<'a> {
    /// Create a parser over a signature blob
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        SignatureParser {
            parser: Parser::new(data),
            depth: 0,
        }
    }

    fn parse_type(&mut self) -> Result<TypeSignature> {
        self.depth += 1;
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        let result = self.parse_type_inner();
        self.depth -= 1;
        result
    }

    fn parse_type_inner(&mut self) -> Result<TypeSignature> {
        let current_byte = self.parser.read_le::<u8>()?;
        match current_byte {
            ELEMENT_TYPE::VOID => Ok(TypeSignature::Void),
            ELEMENT_TYPE::BOOLEAN => Ok(TypeSignature::Boolean),
            ELEMENT_TYPE::CHAR => Ok(TypeSignature::Char),
            ELEMENT_TYPE::I1 => Ok(TypeSignature::I1),
            ELEMENT_TYPE::U1 => Ok(TypeSignature::U1),
            ELEMENT_TYPE::I2 => Ok(TypeSignature::I2),
            ELEMENT_TYPE::U2 => Ok(TypeSignature::U2),
            ELEMENT_TYPE::I4 => Ok(TypeSignature::I4),
            ELEMENT_TYPE::U4 => Ok(TypeSignature::U4),
            ELEMENT_TYPE::I8 => Ok(TypeSignature::I8),
            ELEMENT_TYPE::U8 => Ok(TypeSignature::U8),
            ELEMENT_TYPE::R4 => Ok(TypeSignature::R4),
            ELEMENT_TYPE::R8 => Ok(TypeSignature::R8),
            ELEMENT_TYPE::STRING => Ok(TypeSignature::String),
            ELEMENT_TYPE::PTR => {
                self.parse_custom_mods()?;
                Ok(TypeSignature::Ptr(Box::new(self.parse_type()?)))
            }
            ELEMENT_TYPE::BYREF => Ok(TypeSignature::ByRef(Box::new(self.parse_type()?))),
            ELEMENT_TYPE::VALUETYPE => Ok(TypeSignature::ValueType(
                self.parser.read_compressed_token()?,
            )),
            ELEMENT_TYPE::CLASS => Ok(TypeSignature::Class(self.parser.read_compressed_token()?)),
            ELEMENT_TYPE::VAR => Ok(TypeSignature::GenericParamType(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::ARRAY => {
                let elem_type = self.parse_type()?;
                let rank = self.parser.read_compressed_uint()?;

                let num_sizes = self.parser.read_compressed_uint()?;
                let mut dimensions: Vec<ArrayDimensions> = Vec::new();
                for _ in 0..num_sizes {
                    dimensions.push(ArrayDimensions {
                        size: Some(self.parser.read_compressed_uint()?),
                        lower_bound: None,
                    });
                }

                let num_lo_bounds = self.parser.read_compressed_uint()?;
                for i in 0..num_lo_bounds {
                    let bound = self.parser.read_compressed_uint()?;
                    if let Some(dimension) = dimensions.get_mut(i as usize) {
                        dimension.lower_bound = Some(bound);
                    }
                }

                Ok(TypeSignature::Array(SignatureArray {
                    base: Box::new(elem_type),
                    rank,
                    dimensions,
                }))
            }
            ELEMENT_TYPE::GENERICINST => {
                let peek_byte = self.parser.peek_byte()?;
                if peek_byte != ELEMENT_TYPE::CLASS && peek_byte != ELEMENT_TYPE::VALUETYPE {
                    return Err(malformed_error!(
                        "GENERICINST - Next byte is not TYPE_CLASS or TYPE_VALUE - {}",
                        peek_byte
                    ));
                }

                let base_type = self.parse_type()?;
                let arg_count = self.parser.read_compressed_uint()?;

                let mut type_args = Vec::new();
                for _ in 0..arg_count {
                    type_args.push(self.parse_type()?);
                }

                Ok(TypeSignature::GenericInst(Box::new(base_type), type_args))
            }
            ELEMENT_TYPE::TYPEDBYREF => Ok(TypeSignature::TypedByRef),
            ELEMENT_TYPE::I => Ok(TypeSignature::I),
            ELEMENT_TYPE::U => Ok(TypeSignature::U),
            ELEMENT_TYPE::FNPTR => Ok(TypeSignature::FnPtr(Box::new(
                self.parse_method_signature()?,
            ))),
            ELEMENT_TYPE::OBJECT => Ok(TypeSignature::Object),
            ELEMENT_TYPE::SZARRAY => {
                self.parse_custom_mods()?;
                Ok(TypeSignature::SzArray(Box::new(self.parse_type()?)))
            }
            ELEMENT_TYPE::MVAR => Ok(TypeSignature::GenericParamMethod(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::PINNED => Ok(TypeSignature::Pinned(Box::new(self.parse_type()?))),
            _ => Err(malformed_error!(
                "Unsupported ELEMENT_TYPE - {}",
                current_byte
            )),
        }
    }

    fn parse_custom_mods(&mut self) -> Result<Vec<Token>> {
        let mut mods = Vec::new();

        while self.parser.has_more_data() {
            let next_byte = self.parser.peek_byte()?;
            if next_byte != ELEMENT_TYPE::CMOD_OPT && next_byte != ELEMENT_TYPE::CMOD_REQD {
                break;
            }

            self.parser.advance()?;

            mods.push(self.parser.read_compressed_token()?);
        }

        Ok(mods)
    }

    fn parse_param(&mut self) -> Result<SignatureParameter> {
        let custom_mods = self.parse_custom_mods()?;

        let mut by_ref = false;
        if self.parser.peek_byte()? == ELEMENT_TYPE::BYREF {
            self.parser.advance()?;
            by_ref = true;
        }

        Ok(SignatureParameter {
            modifiers: custom_mods,
            by_ref,
            base: self.parse_type()?,
        })
    }

    /// Parse a `MethodDefSig` or `MethodRefSig`.
    ///
    /// # Errors
    /// Returns an error for truncated data, unknown element types or signatures nested
    /// deeper than the parser allows.
    pub fn parse_method_signature(&mut self) -> Result<SignatureMethod> {
        let convention_byte = self.parser.read_le::<u8>()?;

        let mut method = SignatureMethod {
            has_this: convention_byte & CALLING_CONVENTION::HASTHIS != 0,
            explicit_this: convention_byte & CALLING_CONVENTION::EXPLICITTHIS != 0,
            vararg: convention_byte & 0x0F == CALLING_CONVENTION::VARARG,
            param_count_generic: if convention_byte & CALLING_CONVENTION::GENERIC != 0 {
                self.parser.read_compressed_uint()?
            } else {
                0
            },
            param_count: self.parser.read_compressed_uint()?,
            return_type: self.parse_param()?,
            params: Vec::new(),
            varargs: Vec::new(),
        };

        for _ in 0..method.param_count {
            if self.parser.peek_byte()? == ELEMENT_TYPE::SENTINEL {
                self.parser.advance()?;
                break;
            }

            method.params.push(self.parse_param()?);
        }

        if method.vararg && method.params.len() < method.param_count as usize {
            for _ in method.params.len()..method.param_count as usize {
                method.varargs.push(self.parse_param()?);
            }
        }

        Ok(method)
    }
}
