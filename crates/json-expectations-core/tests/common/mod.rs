//! Greeting-card model shared by the integration tests.
//!
//! Covers every wrapper shape: plain and rule-bearing strings, a list with a
//! whole-list rule, a nested object, an enum, ints, doubles, booleans, an
//! optional member, a member name with punctuation, and an object that may
//! arrive stringified.

#![allow(dead_code)]

use std::sync::OnceLock;

use json_expectations_core::{
    shape, Admitted, Expectation, Field, ListExpectation, ObjectExpectation, ScalarExpectation,
    Symbols, Violation, Violations,
};
use strum::{EnumString, IntoStaticStr, VariantNames};

pub const NOT_EXCITED: &str = "greeting.not-excited";
pub const ONLY_ENGLISH: &str = "greeting.only-english";

/// Plain scalar wrapper with no domain rule.
macro_rules! plain_scalar {
    ($name:ident, $primitive:ty) => {
        impl ScalarExpectation for $name {
            type Primitive = $primitive;

            fn admit(value: Admitted<$primitive>) -> Self {
                Self(value.into_inner())
            }

            fn primitive(&self) -> &$primitive {
                &self.0
            }
        }

        impl Expectation for $name {
            type Shape = shape::Scalar;
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message(pub String);
plain_scalar!(Message, String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MyInt(pub i64);
plain_scalar!(MyInt, i64);

#[derive(Debug, Clone, PartialEq)]
pub struct MyDouble(pub f64);
plain_scalar!(MyDouble, f64);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MyBool(pub bool);
plain_scalar!(MyBool, bool);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantNames)]
pub enum PossibleValues {
    Abc,
    Def,
    Hij,
}

impl Symbols for PossibleValues {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Choice(pub PossibleValues);
plain_scalar!(Choice, PossibleValues);

/// Must contain at least one `!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExcitedMessage(pub String);

impl ScalarExpectation for ExcitedMessage {
    type Primitive = String;

    fn admit(value: Admitted<String>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &String {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        if self.0.contains('!') {
            Ok(self)
        } else {
            Err(Violation::at(NOT_EXCITED, path, "Only excited greetings are allowed!!!").into())
        }
    }
}

impl Expectation for ExcitedMessage {
    type Shape = shape::Scalar;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Greeting(pub String);
plain_scalar!(Greeting, String);

impl Greeting {
    pub fn is_common_english(&self) -> bool {
        ["hello", "hi", "hey", "what's up"].contains(&self.0.to_lowercase().as_str())
    }
}

/// At least one greeting must not be a common English one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternationalGreetings(pub Vec<Greeting>);

impl ListExpectation for InternationalGreetings {
    type Element = Greeting;

    fn admit(elements: Admitted<Vec<Greeting>>) -> Self {
        Self(elements.into_inner())
    }

    fn elements(&self) -> &[Greeting] {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        if self.0.iter().all(Greeting::is_common_english) {
            Err(Violation::at(
                ONLY_ENGLISH,
                path,
                "English greetings are allowed, but at least one non-English greeting is required.",
            )
            .into())
        } else {
            Ok(self)
        }
    }
}

impl Expectation for InternationalGreetings {
    type Shape = shape::List;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inner {
    pub inner_message: Message,
}

#[derive(Default)]
pub struct InnerDraft {
    inner_message: Option<Message>,
}

impl ObjectExpectation for Inner {
    type Draft = InnerDraft;

    fn fields() -> &'static [Field<Self>] {
        static FIELDS: OnceLock<Vec<Field<Inner>>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            vec![Field::required(
                "InnerMessage",
                |inner: &Inner| &inner.inner_message,
                |draft: &mut InnerDraft, value| draft.inner_message = Some(value),
            )]
        })
    }

    fn finish(draft: InnerDraft) -> Option<Self> {
        Some(Inner {
            inner_message: draft.inner_message?,
        })
    }
}

impl Expectation for Inner {
    type Shape = shape::Object;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stringified {
    pub field: Message,
}

#[derive(Default)]
pub struct StringifiedDraft {
    field: Option<Message>,
}

impl ObjectExpectation for Stringified {
    type Draft = StringifiedDraft;

    fn fields() -> &'static [Field<Self>] {
        static FIELDS: OnceLock<Vec<Field<Stringified>>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            vec![Field::required(
                "Field",
                |s: &Stringified| &s.field,
                |draft: &mut StringifiedDraft, value| draft.field = Some(value),
            )]
        })
    }

    fn finish(draft: StringifiedDraft) -> Option<Self> {
        Some(Stringified {
            field: draft.field?,
        })
    }
}

impl Expectation for Stringified {
    type Shape = shape::Object;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Greetings {
    pub optional: Option<Message>,
    pub required: Message,
    pub excited: ExcitedMessage,
    pub international_greetings: InternationalGreetings,
    pub special_property: Message,
    pub inner: Inner,
    pub option: Choice,
    pub integer: MyInt,
    pub integer2: MyInt,
    pub number: MyDouble,
    pub number2: MyDouble,
    pub number3: MyDouble,
    pub boolean: MyBool,
    pub boolean2: MyBool,
    pub boolean3: MyBool,
    pub stringified_object: Stringified,
}

#[derive(Default)]
pub struct GreetingsDraft {
    optional: Option<Message>,
    required: Option<Message>,
    excited: Option<ExcitedMessage>,
    international_greetings: Option<InternationalGreetings>,
    special_property: Option<Message>,
    inner: Option<Inner>,
    option: Option<Choice>,
    integer: Option<MyInt>,
    integer2: Option<MyInt>,
    number: Option<MyDouble>,
    number2: Option<MyDouble>,
    number3: Option<MyDouble>,
    boolean: Option<MyBool>,
    boolean2: Option<MyBool>,
    boolean3: Option<MyBool>,
    stringified_object: Option<Stringified>,
}

impl ObjectExpectation for Greetings {
    type Draft = GreetingsDraft;

    fn fields() -> &'static [Field<Self>] {
        static FIELDS: OnceLock<Vec<Field<Greetings>>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            vec![
                Field::optional(
                    "Optional",
                    |g: &Greetings| g.optional.as_ref(),
                    |d: &mut GreetingsDraft, v| d.optional = Some(v),
                ),
                Field::required(
                    "Required",
                    |g: &Greetings| &g.required,
                    |d: &mut GreetingsDraft, v| d.required = Some(v),
                ),
                Field::required(
                    "Excited",
                    |g: &Greetings| &g.excited,
                    |d: &mut GreetingsDraft, v| d.excited = Some(v),
                ),
                Field::required(
                    "InternationalGreetings",
                    |g: &Greetings| &g.international_greetings,
                    |d: &mut GreetingsDraft, v| d.international_greetings = Some(v),
                ),
                Field::required(
                    "Spec!al::Property",
                    |g: &Greetings| &g.special_property,
                    |d: &mut GreetingsDraft, v| d.special_property = Some(v),
                ),
                Field::required(
                    "Inner",
                    |g: &Greetings| &g.inner,
                    |d: &mut GreetingsDraft, v| d.inner = Some(v),
                ),
                Field::required(
                    "Option",
                    |g: &Greetings| &g.option,
                    |d: &mut GreetingsDraft, v| d.option = Some(v),
                ),
                Field::required(
                    "Integer",
                    |g: &Greetings| &g.integer,
                    |d: &mut GreetingsDraft, v| d.integer = Some(v),
                ),
                Field::required(
                    "Integer2",
                    |g: &Greetings| &g.integer2,
                    |d: &mut GreetingsDraft, v| d.integer2 = Some(v),
                ),
                Field::required(
                    "Number",
                    |g: &Greetings| &g.number,
                    |d: &mut GreetingsDraft, v| d.number = Some(v),
                ),
                Field::required(
                    "Number2",
                    |g: &Greetings| &g.number2,
                    |d: &mut GreetingsDraft, v| d.number2 = Some(v),
                ),
                Field::required(
                    "Number3",
                    |g: &Greetings| &g.number3,
                    |d: &mut GreetingsDraft, v| d.number3 = Some(v),
                ),
                Field::required(
                    "Boolean",
                    |g: &Greetings| &g.boolean,
                    |d: &mut GreetingsDraft, v| d.boolean = Some(v),
                ),
                Field::required(
                    "Boolean2",
                    |g: &Greetings| &g.boolean2,
                    |d: &mut GreetingsDraft, v| d.boolean2 = Some(v),
                ),
                Field::required(
                    "Boolean3",
                    |g: &Greetings| &g.boolean3,
                    |d: &mut GreetingsDraft, v| d.boolean3 = Some(v),
                ),
                Field::required(
                    "StringifiedObject",
                    |g: &Greetings| &g.stringified_object,
                    |d: &mut GreetingsDraft, v| d.stringified_object = Some(v),
                ),
            ]
        })
    }

    fn finish(draft: GreetingsDraft) -> Option<Self> {
        Some(Greetings {
            optional: draft.optional,
            required: draft.required?,
            excited: draft.excited?,
            international_greetings: draft.international_greetings?,
            special_property: draft.special_property?,
            inner: draft.inner?,
            option: draft.option?,
            integer: draft.integer?,
            integer2: draft.integer2?,
            number: draft.number?,
            number2: draft.number2?,
            number3: draft.number3?,
            boolean: draft.boolean?,
            boolean2: draft.boolean2?,
            boolean3: draft.boolean3?,
            stringified_object: draft.stringified_object?,
        })
    }
}

impl Expectation for Greetings {
    type Shape = shape::Object;
}

/// A document that satisfies every member of [`Greetings`].
pub fn valid_document() -> serde_json::Value {
    serde_json::json!({
        "Required": "Hi.",
        "Excited": "Hello World!",
        "InternationalGreetings": ["Hi", "Bonjour", "Hello", "Hola", "Konnichiwa"],
        "Spec!al::Property": "HI!",
        "Inner": { "InnerMessage": "Hello" },
        "Option": "Def",
        "Integer": 7,
        "Integer2": "42",
        "Number": 7,
        "Number2": 7.5,
        "Number3": "7.25",
        "Boolean": true,
        "Boolean2": "TrUe",
        "Boolean3": 1,
        "StringifiedObject": "{\"Field\": \"Value\"}"
    })
}
