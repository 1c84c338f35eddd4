//! One module per cluster of adjacent pipeline steps (spec §4.3). Module
//! doc comments cite the step numbers they implement.

pub mod validation;
pub mod literals;
pub mod sql_block;
pub mod brackets;
pub mod library_calls;
pub mod debug_intrinsics;
pub mod directives_and_tokens;
pub mod template_keyword;
pub mod attributes;
pub mod syntax_check;
pub mod namespaces;
pub mod cppcheck_attrs;
pub mod operator_folding;
pub mod extern_c;
pub mod compound_stmt;
pub mod brace_insertion;
pub mod sizeof_paren;
pub mod array_access;
pub mod template_numeric;
pub mod knr_and_splits;
pub mod case_labels;
pub mod garbage_template;
pub mod calling_convention;
pub mod macro_cleanup;
pub mod platform_types;
pub mod bitfields;
pub mod struct_decl;
pub mod assignment_folding;
pub mod operator_name;
pub mod redundant_parens;
pub mod type_traits;
pub mod pointer_simplify;
pub mod initializer;
pub mod else_if;
pub mod cpp_cast;
pub mod array_size;
pub mod std_prefix;
pub mod plusplus;
pub mod stamping;
pub mod cleanup;
pub mod init_stmt;
pub mod overloaded_operator;

pub use validation::EarlyValidation;
pub use literals::StringLiteralCombination;
pub use sql_block::SqlBlockElision;
pub use brackets::{BracketLinkingPass1, TemplateAngleLinkingPass2, TemplateRightAngleSplit};
pub use library_calls::LibraryCallParenthesization;
pub use debug_intrinsics::DebugIntrinsicFolding;
pub use directives_and_tokens::{AltTokenExpansion, PragmaStripping};
pub use template_keyword::ExtraTemplateKeywordRemoval;
pub use attributes::{CppAttributeDecoding, GccMsvcAttributeDecoding, SpaceshipJoin};
pub use syntax_check::CodeHealthSyntaxCheck;
pub use namespaces::{NamespaceAliasSubstitution, NestedNamespaceFlattening};
pub use cppcheck_attrs::CppcheckAttributeDecoding;
pub use operator_folding::{OperatorFolding, SignedNumberConcatenation};
pub use extern_c::ExternCRemoval;
pub use compound_stmt::CompoundStatementSimplification;
pub use brace_insertion::BraceInsertion;
pub use sizeof_paren::SizeofParenthesization;
pub use array_access::ArrayAccessCanonicalization;
pub use template_numeric::TemplateNumericSimplification;
pub use knr_and_splits::VariableDeclarationSplit;
pub use case_labels::{CaseRangeExpansion, LabelSemicolonInsertion};
pub use garbage_template::GarbageTemplateDetection;
pub use calling_convention::CallingConventionRemoval;
pub use macro_cleanup::{AnonymousAggregateNaming, UnknownMacroSemicolonInsertion};
pub use platform_types::{PlatformTypeMapping, StandardTypeCollapsing};
pub use bitfields::BitfieldSimplification;
pub use struct_decl::StructDeclSplit;
pub use assignment_folding::{BlockAssignmentFolding, MultipleAssignmentExpansion};
pub use operator_name::OperatorNameFolding;
pub use redundant_parens::RedundantParenRemoval;
pub use type_traits::TypeTraitRenaming;
pub use pointer_simplify::FunctionPointerSimplification;
pub use initializer::ConstructorInitializerSimplification;
pub use else_if::ElseIfBraceInsertion;
pub use cpp_cast::CppCastMarking;
pub use array_size::ArraySizeInference;
pub use std_prefix::StdNamespacePrefixing;
pub use plusplus::UnarySignCollapsing;
pub use stamping::ProgressAndIndexStamping;
pub use cleanup::{EmptyNamespaceRemoval, RedundantSemicolonRemoval, VoidParameterCanonicalization};
pub use init_stmt::InitStatementExtraction;
pub use overloaded_operator::OverloadedCallOperatorRewriting;
