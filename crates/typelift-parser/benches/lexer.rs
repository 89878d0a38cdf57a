use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use typelift_parser::{Lexer, Parser};

fn bench_keywords(c: &mut Criterion) {
    let source = "class function const let var if else return import export extends typeof new";

    c.bench_function("lex_keywords", |b| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });
}

fn bench_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("numbers");

    let integers = "42 123 0 999 1_000_000";
    group.bench_with_input(
        BenchmarkId::new("integers", "simple"),
        &integers,
        |b, source| {
            b.iter(|| {
                let lexer = Lexer::new(black_box(source));
                lexer.tokenize().unwrap()
            });
        },
    );

    let hex = "0xFF 0x1234 0xDEADBEEF 0xFF_FF";
    group.bench_with_input(BenchmarkId::new("hex", "various"), &hex, |b, source| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });

    let floats = "3.14 2.718 1.414 0.5 123.456e10 1.23e-5";
    group.bench_with_input(
        BenchmarkId::new("floats", "various"),
        &floats,
        |b, source| {
            b.iter(|| {
                let lexer = Lexer::new(black_box(source));
                lexer.tokenize().unwrap()
            });
        },
    );

    let bigints = "9007199254740993n 123n 1_000n";
    group.bench_with_input(
        BenchmarkId::new("bigints", "various"),
        &bigints,
        |b, source| {
            b.iter(|| {
                let lexer = Lexer::new(black_box(source));
                lexer.tokenize().unwrap()
            });
        },
    );

    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strings");

    let simple = r#""hello" "world" "test""#;
    group.bench_with_input(
        BenchmarkId::new("simple", "3 strings"),
        &simple,
        |b, source| {
            b.iter(|| {
                let lexer = Lexer::new(black_box(source));
                lexer.tokenize().unwrap()
            });
        },
    );

    let escapes = r#""line1\nline2" "tab\there" "quote\"test""#;
    group.bench_with_input(
        BenchmarkId::new("escapes", "basic"),
        &escapes,
        |b, source| {
            b.iter(|| {
                let lexer = Lexer::new(black_box(source));
                lexer.tokenize().unwrap()
            });
        },
    );

    let unicode = r#""Hello" "\u{1F600}" "你好""#;
    group.bench_with_input(
        BenchmarkId::new("unicode", "various"),
        &unicode,
        |b, source| {
            b.iter(|| {
                let lexer = Lexer::new(black_box(source));
                lexer.tokenize().unwrap()
            });
        },
    );

    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let source = "+ - * / % == === != !== < > <= >= && || ! & | += -= *= /= ? ?? ?. => . : ( ) { } [ ] ; , @";

    c.bench_function("lex_operators", |b| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            lexer.tokenize().unwrap()
        });
    });
}

fn bench_model_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_file");

    let model = r#"
        import { Field, ObjectType, ID } from "type-graphql";
        import { Types } from "mongoose";

        @ObjectType()
        export class User {
            @Field(() => ID)
            id: Types.ObjectId;

            @Field()
            email: string;

            @Field({ nullable: true })
            nickname: string | null;

            @Field(() => [String])
            roles: string[];
        }
    "#;

    group.throughput(Throughput::Bytes(model.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("lex", "decorated_class"),
        &model,
        |b, source| {
            b.iter(|| {
                let lexer = Lexer::new(black_box(source));
                lexer.tokenize().unwrap()
            });
        },
    );

    group.bench_with_input(
        BenchmarkId::new("parse", "decorated_class"),
        &model,
        |b, source| {
            b.iter(|| {
                let parser = Parser::new(black_box(source)).unwrap();
                parser.parse().unwrap()
            });
        },
    );

    group.finish();
}

fn bench_large_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_file");

    // Generate a realistic large model file
    let mut source = String::new();
    for i in 0..100 {
        source.push_str(&format!(
            r#"
            @ObjectType()
            class Model{i} {{
                @Field(() => ID)
                id: Types.ObjectId;

                @Field({{ nullable: true }})
                label: string | null;

                @Field(() => [Number])
                scores: number[];
            }}
        "#
        ));
    }

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("100_models", format!("{} bytes", source.len())),
        &source,
        |b, source| {
            b.iter(|| {
                let parser = Parser::new(black_box(source)).unwrap();
                parser.parse().unwrap()
            });
        },
    );

    group.finish();
}

criterion_group!(
    benches,
    bench_keywords,
    bench_numbers,
    bench_strings,
    bench_operators,
    bench_model_file,
    bench_large_file
);

criterion_main!(benches);
