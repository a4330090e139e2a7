crate::define_id_enum! {
    /// Host syntax an initialization snippet is written in
    SyntaxId {
        JavaScript => "javascript" : "JavaScript" | "js" | "node" | "typescript" | "ts" | "browser",
        Python => "python" : "Python" | "py",
        Ruby => "ruby" : "Ruby" | "rb" | "rails",
        Php => "php" : "PHP" | "laravel",
        Go => "go" : "Go" | "golang",
        Java => "java" : "Java" | "spring",
        Kotlin => "kotlin" : "Kotlin" | "kt" | "android",
        DotNet => "dotnet" : "C#" | "csharp" | "cs" | ".net",
        Cocoa => "cocoa" : "Swift" | "swift" | "ios",
        Dart => "dart" : "Dart" | "flutter",
        Rust => "rust" : "Rust" | "rs",
        Elixir => "elixir" : "Elixir" | "ex" | "exs",
    }
}
